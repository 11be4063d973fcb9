use std::fmt;

use error_stack::{Report, Result};
use strum::{EnumCount, IntoEnumIterator};

use crate::hand::{Hand, Handedness, Point2D, LANDMARK_COUNT, TIP_IDS};
use crate::GError;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumCount,
    strum_macros::EnumIter,
)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn tip(&self) -> usize {
        TIP_IDS[*self as usize]
    }

    /// Joint the tip is compared against: one below for the thumb, two below
    /// for the other fingers.
    pub fn reference(&self) -> usize {
        match self {
            Self::Thumb => self.tip() - 1,
            _ => self.tip() - 2,
        }
    }
}

/// Which fingers are raised, ordered [thumb, index, middle, ring, pinky].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FingerState(pub [bool; Finger::COUNT]);

impl FingerState {
    /// All fingers down. Also what a hand without landmarks yields.
    pub const NONE: FingerState = FingerState([false; Finger::COUNT]);

    pub const fn new(fingers: [bool; Finger::COUNT]) -> Self {
        Self(fingers)
    }

    /// Derives the finger state of a single hand.
    ///
    /// A hand with no landmarks at all yields [`FingerState::NONE`]. Any other
    /// count but 21 is rejected with [`GError::InvalidLandmarkCount`].
    pub fn from_hand(hand: &Hand) -> Result<Self, GError> {
        let lms = &hand.landmarks;

        if lms.is_empty() {
            return Ok(Self::NONE);
        }

        if !hand.is_complete() {
            return Err(Report::new(GError::InvalidLandmarkCount).attach_printable(format!(
                "expected {LANDMARK_COUNT} landmarks, got {}",
                lms.len()
            )));
        }

        let mut fingers = [false; Finger::COUNT];
        for finger in Finger::iter() {
            let tip = &lms[finger.tip()];
            let reference = &lms[finger.reference()];

            fingers[finger as usize] = match finger {
                Finger::Thumb => thumb_up(hand.handedness, tip, reference),
                _ => tip.y < reference.y,
            };
        }

        Ok(Self(fingers))
    }

    pub fn is_up(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    pub fn count_up(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }

    pub fn as_array(&self) -> [bool; Finger::COUNT] {
        self.0
    }
}

// The camera image is mirrored, so a left hand's thumb opens towards +x.
fn thumb_up(handedness: Handedness, tip: &Point2D, reference: &Point2D) -> bool {
    match handedness {
        Handedness::Left => tip.x > reference.x,
        Handedness::Right | Handedness::Unknown => tip.x < reference.x,
    }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for up in self.0 {
            write!(f, "{}", up as u8)?;
        }
        Ok(())
    }
}
