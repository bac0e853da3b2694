/// Dimensions reported by the active capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    pub width: u32,
    pub height: u32,
}

/// One encoding layer of the local video sender.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingParameters {
    pub rid: Option<String>,
    pub max_bitrate_bps: u64,
    pub max_framerate: Option<u32>,
    pub scale_resolution_down_by: f64,
    pub active: bool,
}

/// Surface of the peer connection's send transceiver. The negotiation core
/// only reads capture state and pushes encoder settings through it.
pub trait TransceiverController: Send {
    fn has_video_input(&self) -> bool;
    fn local_capture_settings(&self) -> Option<CaptureSettings>;
    fn set_encoding_parameters(&mut self, parameters: &EncodingParameters);
}
