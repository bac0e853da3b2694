pub use sdp::SDP;

pub use crate::config::{RuntimeFamily, SessionConfiguration, VideoDuplexMode};
pub use crate::session::SessionContext;
pub use crate::signaling::{
    SignalFrame, SignalingCommand, SignalingCommandReceiver, SignalingError, SignalingEvent,
    SignalingEventReceiver, SignalingEventSender, SignalingHandle, StreamAllocation, SubscribeAck,
    SubscribeRequest,
};
pub use crate::tasks::subscribe_task::SubscribeExchange;
pub use crate::tasks::{SessionStatusCode, SessionTask, TaskCanceler, TaskError, TaskStatus};
pub use crate::transceiver::{CaptureSettings, EncodingParameters, TransceiverController};
pub use crate::uplink_policy::{CaptureEncodeParameters, ConnectionMetrics, NScaleUplinkPolicy};
pub use crate::video_index::{LocalVideoDescription, VideoStreamIndex};

mod config;
mod session;
mod signaling;
mod tasks;
mod transceiver;
mod uplink_policy;
mod video_index;
