use serde::Deserialize;

pub const DEFAULT_CAMERA_SOCKET: &str = "/tmp/handsign-cam.sock";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraProperties {
    pub socket: String,
    pub img_width: u32,
    pub img_height: u32,
}

impl Default for CameraProperties {
    fn default() -> Self {
        Self {
            socket: DEFAULT_CAMERA_SOCKET.into(),
            img_width: 640,
            img_height: 480,
        }
    }
}
