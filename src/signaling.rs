use serde::Serialize;

use crate::video_index::LocalVideoDescription;

pub type SignalingEventSender = tokio::sync::mpsc::UnboundedSender<SignalingEvent>;
pub type SignalingEventReceiver = tokio::sync::mpsc::UnboundedReceiver<SignalingEvent>;
pub type SignalingCommandReceiver = tokio::sync::mpsc::UnboundedReceiver<SignalingCommand>;
type Sender = tokio::sync::mpsc::UnboundedSender<SignalingCommand>;

/// Commands forwarded to whichever transport drives the signaling
/// connection. The negotiation core never talks to the wire itself.
#[derive(Debug)]
pub enum SignalingCommand {
    Subscribe(SubscribeRequest),
    RegisterObserver(usize, SignalingEventSender),
    RemoveObserver(usize),
}

/// Events the transport reports back to registered observers.
#[derive(Debug, Clone)]
pub enum SignalingEvent {
    FrameReceived(SignalFrame),
    ConnectionTerminated { close_code: u16, reason: String },
}

/// Decoded control frame. Frame decoding happens in the transport, only
/// the frames the negotiation core reacts to are spelled out here.
#[derive(Debug, Clone)]
pub enum SignalFrame {
    SubscribeAck(SubscribeAck),
    Unrecognized,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest {
    pub attendee_id: String,
    pub sdp_offer: String,
    pub audio_host_url: String,
    pub audio_muted: bool,
    pub audio_checkin: bool,
    pub receive_stream_ids: Vec<u32>,
    pub local_video_enabled: bool,
    pub video_stream_descriptions: Vec<LocalVideoDescription>,
    pub connection_type_has_video: bool,
}

#[derive(Debug, Clone)]
pub struct SubscribeAck {
    pub sdp_answer: String,
    pub allocations: Vec<StreamAllocation>,
}

/// Server-side assignment of a local track to stream and group ids.
#[derive(Debug, Clone)]
pub struct StreamAllocation {
    pub track_label: String,
    pub stream_id: u32,
    pub group_id: u32,
}

#[derive(Debug)]
pub enum SignalingError {
    ChannelClosed,
}

/// Cloneable handle onto the signaling transport.
#[derive(Debug, Clone)]
pub struct SignalingHandle {
    sender: Sender,
}

impl SignalingHandle {
    /// Creates the handle together with the command stream its transport
    /// has to drain.
    pub fn new() -> (Self, SignalingCommandReceiver) {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel::<SignalingCommand>();
        (SignalingHandle { sender }, receiver)
    }

    pub fn subscribe(&self, request: SubscribeRequest) -> Result<(), SignalingError> {
        self.sender
            .send(SignalingCommand::Subscribe(request))
            .map_err(|_| SignalingError::ChannelClosed)
    }

    pub fn register_observer(
        &self,
        id: usize,
        observer: SignalingEventSender,
    ) -> Result<(), SignalingError> {
        self.sender
            .send(SignalingCommand::RegisterObserver(id, observer))
            .map_err(|_| SignalingError::ChannelClosed)
    }

    /// Removal is fire-and-forget. A transport that already went away has
    /// no observers left to remove.
    pub fn remove_observer(&self, id: usize) {
        self.sender.send(SignalingCommand::RemoveObserver(id)).ok();
    }
}
