use std::{ops::Deref, os::unix::net::UnixStream};

use error_stack::{Result, ResultExt};
use log::{debug, info};
use serde::Deserialize;

use crate::{
    config::DetectorProperties,
    hand::{Hand, Handedness, Point2D},
    traits::{LandmarkSource, WantIpc},
    GError, ImageFrame,
};

/// Client for an out-of-process hand landmark model listening on a unix socket.
pub struct HandLandmarker {
    unix_stream: UnixStream,
    props: DetectorProperties,
}

impl HandLandmarker {
    pub fn connect(props: DetectorProperties) -> Result<Self, GError> {
        let unix_stream = UnixStream::connect(&props.socket)
            .change_context(GError::DetectorError)
            .attach_printable_lazy(|| format!("Couldn't connect to {}", props.socket))?;

        Self::new(unix_stream, props)
    }

    /// Sends the model settings over `unix_stream` before any frame.
    pub fn new(unix_stream: UnixStream, props: DetectorProperties) -> Result<Self, GError> {
        let instance = Self { unix_stream, props };

        instance.send_u32(instance.props.static_image_mode as u32)?;
        instance.send_u32(instance.props.max_hands)?;
        instance.send_u32(instance.props.model_complexity)?;
        instance.send_f32(instance.props.detection_confidence)?;
        instance.send_f32(instance.props.tracking_confidence)?;

        info!("Hand landmark model connected");
        Ok(instance)
    }

    pub fn execute(&self, img: &ImageFrame) -> Result<HandPreds, GError> {
        let ImageFrame {
            frame,
            width,
            height,
        } = img;

        self.send_ipc(frame, *width, *height)?;
        let res = self.recv_ipc()?;
        serde_json::from_slice(&res)
            .change_context(GError::DetectorError)
            .attach_printable("Couldn't parse the landmark model response")
    }
}

impl LandmarkSource for HandLandmarker {
    fn detect(&mut self, frame: &ImageFrame) -> Result<Vec<Hand>, GError> {
        let preds = self.execute(frame)?;
        debug!("landmark model returned {} hand(s)", preds.len());

        Ok(preds
            .iter()
            .take(self.props.max_hands as usize)
            .map(|p| p.to_hand(frame.width, frame.height))
            .collect())
    }
}

impl WantIpc for HandLandmarker {
    fn unix_stream(&self) -> &UnixStream {
        &self.unix_stream
    }
}

#[derive(Default, Debug, Deserialize, Clone)]
pub struct HandPreds {
    pub hands: Vec<HandPrediction>,
}

impl Deref for HandPreds {
    type Target = Vec<HandPrediction>;

    fn deref(&self) -> &Self::Target {
        &self.hands
    }
}

/// One hand as reported by the model, landmarks normalized to 0..1.
#[derive(Default, Debug, Deserialize, Clone, PartialEq)]
pub struct HandPrediction {
    #[serde(default)]
    pub handedness: Handedness,
    pub landmarks: Vec<Point2D>,
}

impl HandPrediction {
    pub fn to_hand(&self, w: u32, h: u32) -> Hand {
        Hand::from_normalized(self.handedness, &self.landmarks, w, h)
    }
}
