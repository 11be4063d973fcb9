use std::sync::Arc;

use error_stack::ResultExt;
use flume::{Receiver, TryRecvError};
use log::{debug, info, warn};

mod error;

pub mod camera;
pub mod config;
pub mod display;
pub mod fingers;
pub mod gesture;
pub mod hand;
pub mod models;
pub mod traits;

pub use error::GError;
pub use fingers::{Finger, FingerState};
pub use gesture::Gesture;
pub use hand::{Hand, Handedness, Point2D};
pub use traits::{DisplaySink, FrameSource, LandmarkSource};

use display::FpsCounter;

/// A point in normalized (0..1) image coordinates together with the image size.
pub struct ImageCoords {
    pub x: f32,
    pub y: f32,
    w: f32,
    h: f32,
}

impl ImageCoords {
    pub fn new(x: f32, y: f32, w: u32, h: u32) -> Self {
        Self {
            x,
            y,
            w: w as f32,
            h: h as f32,
        }
    }

    pub fn x_max(&self) -> f32 {
        self.w
    }

    pub fn y_max(&self) -> f32 {
        self.h
    }

    /// Pixel position, truncated toward zero.
    pub fn to_pixel(&self) -> Point2D {
        Point2D::new(
            (self.x * self.x_max()).trunc(),
            (self.y * self.y_max()).trunc(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct ImageFrame {
    pub frame: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

impl ImageFrame {
    pub fn new(frame: impl Into<Arc<[u8]>>, width: u32, height: u32) -> Self {
        Self {
            frame: frame.into(),
            width,
            height,
        }
    }
}

impl Default for ImageFrame {
    fn default() -> Self {
        Self::new(Vec::new(), 0, 0)
    }
}

/// What happened to a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub hands: usize,
    pub fingers: Option<FingerState>,
    pub gesture: Option<Gesture>,
    pub fps: f32,
}

impl FrameReport {
    /// Label handed to the display, empty when there is no gesture.
    pub fn label(&self) -> &'static str {
        self.gesture.map(|g| g.label()).unwrap_or("")
    }
}

/// Classifies the first hand, `None` when there is no hand to classify.
/// A hand without landmarks counts as no hand, so it never reaches the
/// classifier as a closed fist.
pub fn classify_hands(
    hands: &[Hand],
) -> error_stack::Result<Option<(FingerState, Gesture)>, GError> {
    let Some(hand) = hands.first().filter(|h| !h.landmarks.is_empty()) else {
        return Ok(None);
    };

    let fingers = FingerState::from_hand(hand)?;
    Ok(Some((fingers, Gesture::classify(fingers))))
}

fn is_fatal(err: &GError) -> bool {
    matches!(err, GError::CameraError | GError::IpcError)
}

pub struct App<F, L, D> {
    pub frames: F,
    pub landmarks: L,
    pub display: D,
    fps: FpsCounter,
}

impl<F, L, D> App<F, L, D>
where
    F: FrameSource,
    L: LandmarkSource,
    D: DisplaySink,
{
    pub fn new(frames: F, landmarks: L, display: D) -> Self {
        Self {
            frames,
            landmarks,
            display,
            fps: FpsCounter::new(),
        }
    }

    /// Captures, detects, classifies and displays one frame.
    pub fn step(&mut self) -> error_stack::Result<FrameReport, GError> {
        let frame = self.frames.next_frame()?;
        let hands = self.landmarks.detect(&frame)?;

        let classified = match classify_hands(&hands) {
            Ok(c) => c,
            Err(e) => {
                warn!("skipping malformed hand: {e:?}");
                None
            }
        };

        let fps = self.fps.tick();
        let report = FrameReport {
            hands: hands.len(),
            fingers: classified.map(|(f, _)| f),
            gesture: classified.map(|(_, g)| g),
            fps,
        };

        if let Some(fingers) = report.fingers {
            debug!("fingers {fingers} -> {}", report.label());
        }

        self.display
            .show(&frame, fps, report.label())
            .change_context(GError::DisplayError)?;

        Ok(report)
    }

    /// Runs frames until `quit` receives a message or its sender goes away.
    ///
    /// A frame that fails inside detection, classification or display is
    /// logged and skipped. A lost camera or a broken socket ends the loop with
    /// the error, since no later frame can succeed either.
    pub fn run(&mut self, quit: &Receiver<()>) -> error_stack::Result<(), GError> {
        info!("Starting frame loop");
        loop {
            if let Err(e) = self.step() {
                if is_fatal(e.current_context()) {
                    return Err(e).attach_printable("Frame loop aborted");
                }
                warn!("frame failed: {e:?}");
            }

            match quit.try_recv() {
                Err(TryRecvError::Empty) => {}
                Ok(()) | Err(TryRecvError::Disconnected) => break,
            }
        }
        info!("Frame loop stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::LANDMARK_COUNT;

    #[test]
    fn coords_to_pixel() {
        let coords = ImageCoords::new(0.5, 0.999, 1280, 720);
        assert_eq!(coords.to_pixel(), Point2D::new(640.0, 719.0));
    }

    #[test]
    fn no_hands_is_no_gesture() {
        assert_eq!(classify_hands(&[]).unwrap(), None);
    }

    #[test]
    fn hand_without_landmarks_is_no_gesture() {
        let empty = Hand::new(Handedness::Right, vec![]);
        assert_eq!(classify_hands(&[empty]).unwrap(), None);
    }

    #[test]
    fn only_first_hand_is_classified() {
        let fist = Hand::new(Handedness::Right, vec![Point2D::ZERO; LANDMARK_COUNT]);
        let broken = Hand::new(Handedness::Left, vec![Point2D::ZERO; 3]);

        let (fingers, gesture) = classify_hands(&[fist, broken.clone()]).unwrap().unwrap();
        assert_eq!(fingers, FingerState::NONE);
        assert_eq!(gesture, Gesture::Off);

        assert!(classify_hands(&[broken]).is_err());
    }

    #[test]
    fn only_transport_errors_are_fatal() {
        assert!(is_fatal(&GError::CameraError));
        assert!(is_fatal(&GError::IpcError));
        assert!(!is_fatal(&GError::DetectorError));
        assert!(!is_fatal(&GError::DisplayError));
        assert!(!is_fatal(&GError::InvalidLandmarkCount));
    }

    #[test]
    fn empty_label_without_gesture() {
        let report = FrameReport {
            hands: 0,
            fingers: None,
            gesture: None,
            fps: 0.0,
        };
        assert_eq!(report.label(), "");
    }
}
