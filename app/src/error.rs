use std::fmt;

use error_stack::Context;

#[derive(Debug)]
pub enum GError {
    InvalidLandmarkCount,
    CommError,
    IpcError,
    ConfigError,
    CameraError,
    DetectorError,
    DisplayError,
}

impl fmt::Display for GError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLandmarkCount => write!(f, "Hand does not have 21 landmarks"),
            Self::CommError => write!(f, "Error in channel"),
            Self::IpcError => write!(f, "Error while communicating with process"),
            Self::ConfigError => write!(f, "Error in loading config"),
            Self::CameraError => write!(f, "Camera Error"),
            Self::DetectorError => write!(f, "Landmark detector Error"),
            Self::DisplayError => write!(f, "Error while displaying frame"),
        }
    }
}

impl Context for GError {}
