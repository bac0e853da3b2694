use sdp::SDP;

use crate::config::{SessionConfiguration, VideoDuplexMode};
use crate::signaling::SignalingHandle;
use crate::tasks::TaskCanceler;
use crate::uplink_policy::CaptureEncodeParameters;
use crate::video_index::VideoStreamIndex;

/// Shared state of one negotiation session. The session controller owns it
/// and lends it to one task at a time.
pub struct SessionContext {
    pub configuration: SessionConfiguration,
    pub signaling: SignalingHandle,
    pub video_stream_index: Box<dyn VideoStreamIndex>,
    pub video_duplex_mode: VideoDuplexMode,
    pub audio_muted: bool,
    /// Stream ids to subscribe to, zero marks a slot with no subscription.
    pub video_subscriptions: Vec<u32>,
    pub video_capture_and_encode_parameter: CaptureEncodeParameters,
    pub local_sdp_offer: Option<SDP>,
    pub previous_sdp_offer: Option<SDP>,
    pub sdp_answer: Option<SDP>,
    /// Canceler of the subscribe round currently in flight, if any.
    pub outstanding_subscribe: Option<TaskCanceler>,
}

impl SessionContext {
    pub fn new(
        configuration: SessionConfiguration,
        signaling: SignalingHandle,
        video_stream_index: Box<dyn VideoStreamIndex>,
    ) -> Self {
        SessionContext {
            configuration,
            signaling,
            video_stream_index,
            video_duplex_mode: VideoDuplexMode::Receive,
            audio_muted: false,
            video_subscriptions: Vec::new(),
            video_capture_and_encode_parameter: CaptureEncodeParameters::disabled(),
            local_sdp_offer: None,
            previous_sdp_offer: None,
            sdp_answer: None,
            outstanding_subscribe: None,
        }
    }

    /// Whether the ssrc of the local video send section moved between the
    /// previous subscribe round and the current offer. A restarted sender
    /// keeps its transceiver but negotiates a fresh ssrc.
    pub fn local_video_ssrc_changed(&self) -> bool {
        match (&self.local_sdp_offer, &self.previous_sdp_offer) {
            (Some(current), Some(previous)) => {
                current.video_send_section_has_different_ssrc(previous)
            }
            _ => false,
        }
    }
}
