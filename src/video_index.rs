use serde::Serialize;

use crate::signaling::SubscribeAck;
use crate::transceiver::EncodingParameters;

/// View onto the roster of video streams published in the session. The
/// session controller owns the implementation, tasks and policies only
/// consume this surface.
pub trait VideoStreamIndex: Send {
    fn video_publishing_participants_excluding_self(&self, attendee_id: &str) -> usize;
    /// Records the encoding layers the uplink policy settled on so that
    /// local stream descriptions report matching bitrates.
    fn integrate_uplink_policy_decision(&mut self, encodings: &[EncodingParameters]);
    /// Marks the pending roster state as sent to the server.
    fn subscribe_frame_sent(&mut self);
    fn integrate_subscribe_ack(&mut self, ack: &SubscribeAck);
    fn local_stream_descriptions(&self) -> Vec<LocalVideoDescription>;
}

/// Description of one locally published stream as reported to the server.
#[derive(Debug, Clone, Serialize)]
pub struct LocalVideoDescription {
    pub stream_id: u32,
    pub group_id: u32,
    pub max_bitrate_kbps: u32,
    pub attendee_id: String,
}
