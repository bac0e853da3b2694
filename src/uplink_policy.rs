use log::debug;

use crate::transceiver::{CaptureSettings, EncodingParameters, TransceiverController};
use crate::video_index::VideoStreamIndex;

static DEFAULT_IDEAL_MAX_BANDWIDTH_KBPS: u32 = 1400;
static DEFAULT_CAPTURE_WIDTH: u32 = 640;
static DEFAULT_CAPTURE_HEIGHT: u32 = 384;
static REDUCED_CAPTURE_WIDTH: u32 = 320;
static REDUCED_CAPTURE_HEIGHT: u32 = 192;
static CAPTURE_FRAME_RATE: u32 = 15;

/// Downscale targets for the shorter edge of the outgoing capture, indexed
/// by participant count. Counts past the end keep the last entry.
static TARGET_HEIGHTS: [u32; 26] = [
    0, 0, 0, 540, 540, 480, 480, 480, 480, 360, 360, 360, 360, 270, 270, 270, 270, 180, 180, 180,
    180, 180, 180, 180, 180, 180,
];

/// Capture and encode settings the uplink policy settled on for the local
/// video sender.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEncodeParameters {
    pub camera_width: u32,
    pub camera_height: u32,
    pub camera_frame_rate: u32,
    pub max_encode_bitrate_kbps: u32,
    pub scale_resolution_down_by: f64,
}

impl CaptureEncodeParameters {
    /// State before any roster update, nothing is captured or encoded.
    pub fn disabled() -> Self {
        CaptureEncodeParameters {
            camera_width: 0,
            camera_height: 0,
            camera_frame_rate: 0,
            max_encode_bitrate_kbps: 0,
            scale_resolution_down_by: 1.0,
        }
    }
}

/// Carried by metric observers. The uplink side keys everything off the
/// participant count, so this policy ignores it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionMetrics {
    pub uplink_kbps: u32,
}

/// Scales the local video uplink down as the session grows. Capture presets
/// and the bitrate curve step at fixed participant counts, resolution
/// scaling follows the target height table.
pub struct NScaleUplinkPolicy {
    attendee_id: String,
    scale_resolution: bool,
    ideal_max_bandwidth_kbps: u32,
    has_bandwidth_priority: bool,
    participant_count: usize,
    optimal_parameters: CaptureEncodeParameters,
    parameters_in_effect: CaptureEncodeParameters,
    transceiver_controller: Option<Box<dyn TransceiverController>>,
    last_encoding_parameters: Option<EncodingParameters>,
}

impl NScaleUplinkPolicy {
    pub fn new(attendee_id: &str, scale_resolution: bool) -> Self {
        NScaleUplinkPolicy {
            attendee_id: attendee_id.to_string(),
            scale_resolution,
            ideal_max_bandwidth_kbps: DEFAULT_IDEAL_MAX_BANDWIDTH_KBPS,
            has_bandwidth_priority: false,
            participant_count: 0,
            optimal_parameters: CaptureEncodeParameters::disabled(),
            parameters_in_effect: CaptureEncodeParameters::disabled(),
            transceiver_controller: None,
            last_encoding_parameters: None,
        }
    }

    pub fn set_ideal_max_bandwidth_kbps(&mut self, kbps: u32) {
        self.ideal_max_bandwidth_kbps = kbps;
    }

    pub fn set_has_bandwidth_priority(&mut self, has_bandwidth_priority: bool) {
        self.has_bandwidth_priority = has_bandwidth_priority;
    }

    pub fn set_transceiver_controller(&mut self, controller: Box<dyn TransceiverController>) {
        self.transceiver_controller = Some(controller);
    }

    /// Recomputes the optimal parameters from the published-video roster.
    /// The local sender counts as one participant while it has input.
    pub fn update_index(&mut self, index: &dyn VideoStreamIndex) {
        let has_local_video = self
            .transceiver_controller
            .as_ref()
            .map(|controller| controller.has_video_input())
            .unwrap_or(true);
        self.participant_count = index
            .video_publishing_participants_excluding_self(&self.attendee_id)
            + if has_local_video { 1 } else { 0 };

        let capture_settings = self
            .transceiver_controller
            .as_ref()
            .and_then(|controller| controller.local_capture_settings());
        self.optimal_parameters = CaptureEncodeParameters {
            camera_width: self.capture_width(),
            camera_height: self.capture_height(),
            camera_frame_rate: CAPTURE_FRAME_RATE,
            max_encode_bitrate_kbps: self.max_bandwidth_kbps(),
            scale_resolution_down_by: self.scale_factor(capture_settings),
        };
    }

    pub fn wants_resubscribe(&self) -> bool {
        self.parameters_in_effect != self.optimal_parameters
    }

    pub fn choose_capture_and_encode_parameters(&mut self) -> CaptureEncodeParameters {
        self.parameters_in_effect = self.optimal_parameters.clone();
        self.parameters_in_effect.clone()
    }

    /// Pushes recalculated encoding parameters to the send transceiver when
    /// bitrate or scale moved since the last push.
    pub fn update_transceiver_controller(&mut self) {
        let settings = match self
            .transceiver_controller
            .as_ref()
            .and_then(|controller| controller.local_capture_settings())
        {
            Some(settings) => settings,
            None => return,
        };
        let parameters = self.calculate_encoding_parameters(settings);
        if !self.should_update_encoding_parameters(&parameters) {
            return;
        }
        debug!(target: "Uplink Policy", "Pushing encoding parameters {:?}", parameters);
        self.last_encoding_parameters = Some(parameters.clone());
        if let Some(controller) = self.transceiver_controller.as_mut() {
            controller.set_encoding_parameters(&parameters);
        }
    }

    pub fn update_connection_metric(&mut self, _metrics: &ConnectionMetrics) {}

    fn capture_width(&self) -> u32 {
        if self.participant_count > 4 {
            REDUCED_CAPTURE_WIDTH
        } else {
            DEFAULT_CAPTURE_WIDTH
        }
    }

    fn capture_height(&self) -> u32 {
        if self.participant_count > 4 {
            REDUCED_CAPTURE_HEIGHT
        } else {
            DEFAULT_CAPTURE_HEIGHT
        }
    }

    fn max_bandwidth_kbps(&self) -> u32 {
        if self.has_bandwidth_priority {
            return self.ideal_max_bandwidth_kbps;
        }
        if self.participant_count <= 2 {
            return self.ideal_max_bandwidth_kbps;
        }
        if self.participant_count <= 4 {
            return self.ideal_max_bandwidth_kbps * 2 / 3;
        }
        let participants = self.participant_count as f64;
        let rate = (544.0 / 11.0 + 14880.0 / (11.0 * participants)) / 600.0
            * f64::from(self.ideal_max_bandwidth_kbps);
        rate as u32
    }

    fn scale_factor(&self, capture_settings: Option<CaptureSettings>) -> f64 {
        if !self.scale_resolution || self.has_bandwidth_priority || self.participant_count <= 2 {
            return 1.0;
        }
        let settings = match capture_settings {
            Some(settings) => settings,
            None => return 1.0,
        };
        let target_index = self.participant_count.min(TARGET_HEIGHTS.len() - 1);
        let scale = f64::from(settings.width.min(settings.height))
            / f64::from(TARGET_HEIGHTS[target_index]);
        if scale < 1.0 {
            1.0
        } else {
            scale
        }
    }

    fn calculate_encoding_parameters(&self, settings: CaptureSettings) -> EncodingParameters {
        EncodingParameters {
            rid: None,
            max_bitrate_bps: u64::from(self.max_bandwidth_kbps()) * 1000,
            max_framerate: None,
            scale_resolution_down_by: self.scale_factor(Some(settings)),
            active: true,
        }
    }

    fn should_update_encoding_parameters(&self, parameters: &EncodingParameters) -> bool {
        match &self.last_encoding_parameters {
            Some(last) => {
                last.max_bitrate_bps != parameters.max_bitrate_bps
                    || last.scale_resolution_down_by != parameters.scale_resolution_down_by
            }
            None => true,
        }
    }
}
