use glam::Vec2;
use serde::Deserialize;

use crate::ImageCoords;

/// Pixel coordinates of a single landmark in image space, y grows downward.
pub type Point2D = Vec2;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Fingertips in [thumb, index, middle, ring, pinky] order.
pub const TIP_IDS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum_macros::EnumIs)]
#[serde(from = "String")]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl From<&str> for Handedness {
    fn from(value: &str) -> Self {
        match value {
            "Left" => Self::Left,
            "Right" => Self::Right,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for Handedness {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// One detected hand. Lives for a single frame and is passed by reference
/// through extraction and classification.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Hand {
    #[serde(default)]
    pub handedness: Handedness,
    pub landmarks: Vec<Point2D>,
}

impl Hand {
    pub fn new(handedness: Handedness, landmarks: Vec<Point2D>) -> Self {
        Self {
            handedness,
            landmarks,
        }
    }

    /// Builds a hand from detector output in normalized (0..1) coordinates.
    pub fn from_normalized(handedness: Handedness, points: &[Point2D], w: u32, h: u32) -> Self {
        let landmarks = points
            .iter()
            .map(|p| ImageCoords::new(p.x, p.y, w, h).to_pixel())
            .collect();

        Self::new(handedness, landmarks)
    }

    pub fn landmark(&self, id: usize) -> Option<&Point2D> {
        self.landmarks.get(id)
    }

    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == LANDMARK_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handedness_from_label() {
        assert_eq!(Handedness::from("Left"), Handedness::Left);
        assert_eq!(Handedness::from("Right"), Handedness::Right);
        assert_eq!(Handedness::from("left"), Handedness::Unknown);
        assert_eq!(Handedness::from(""), Handedness::Unknown);
    }

    #[test]
    fn normalized_points_are_truncated_to_pixels() {
        let hand = Hand::from_normalized(
            Handedness::Right,
            &[Vec2::new(0.5, 0.25), Vec2::new(0.999, 0.0014)],
            640,
            480,
        );

        assert_eq!(hand.landmarks[0], Vec2::new(320.0, 120.0));
        assert_eq!(hand.landmarks[1], Vec2::new(639.0, 0.0));
    }

    #[test]
    fn parse_hand_json() {
        let hand: Hand =
            serde_json::from_str(r#"{"handedness":"Left","landmarks":[[1.0,2.0],[3,4]]}"#)
                .unwrap();

        assert!(hand.handedness.is_left());
        assert_eq!(hand.landmark(1), Some(&Vec2::new(3.0, 4.0)));
        assert!(!hand.is_complete());
    }

    #[test]
    fn missing_handedness_is_unknown() {
        let hand: Hand = serde_json::from_str(r#"{"landmarks":[]}"#).unwrap();
        assert!(hand.handedness.is_unknown());
    }
}
