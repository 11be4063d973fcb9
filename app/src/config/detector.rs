use serde::Deserialize;

pub const DEFAULT_DETECTOR_SOCKET: &str = "/tmp/handsign-detector.sock";

/// Settings handed to the landmark model as-is.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DetectorProperties {
    pub socket: String,
    pub max_hands: u32,
    pub detection_confidence: f32,
    pub tracking_confidence: f32,
    pub static_image_mode: bool,
    pub model_complexity: u32,
}

impl Default for DetectorProperties {
    fn default() -> Self {
        Self {
            socket: DEFAULT_DETECTOR_SOCKET.into(),
            max_hands: 2,
            detection_confidence: 0.5,
            tracking_confidence: 0.5,
            static_image_mode: false,
            model_complexity: 1,
        }
    }
}
