use std::{fs, path::PathBuf};

use error_stack::{Report, ResultExt};
use serde::Deserialize;

mod camera;
mod detector;

pub use camera::{CameraProperties, DEFAULT_CAMERA_SOCKET};
pub use detector::{DetectorProperties, DEFAULT_DETECTOR_SOCKET};

use crate::GError;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub camera: CameraProperties,
    pub detector: DetectorProperties,
}

impl Config {
    pub fn open(path: PathBuf) -> error_stack::Result<Self, GError> {
        Self::try_from(path)
    }

    pub fn parse(s: &str) -> error_stack::Result<Self, GError> {
        toml::from_str(s).change_context(GError::ConfigError)
    }
}

impl TryFrom<PathBuf> for Config {
    type Error = Report<GError>;

    fn try_from(value: PathBuf) -> Result<Self, Self::Error> {
        let s = fs::read_to_string(&value)
            .change_context(GError::ConfigError)
            .attach_printable_lazy(|| format!("Couldn't read the config file {}", value.display()))?;

        Self::parse(&s)
    }
}
