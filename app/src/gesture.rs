use crate::fingers::FingerState;

const F: bool = false;
const T: bool = true;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIs,
)]
pub enum Gesture {
    #[strum(serialize = "OFF")]
    Off,
    #[strum(serialize = "ON")]
    On,
    #[strum(serialize = "Increase Speed")]
    IncreaseSpeed,
    #[strum(serialize = "Maximum Speed")]
    MaximumSpeed,
    #[strum(serialize = "Decrease Speed")]
    DecreaseSpeed,
    #[strum(serialize = "Unknown Gesture")]
    Unknown,
}

/// Patterns are checked top to bottom, anything left over is `Unknown`.
pub const GESTURE_TABLE: [(FingerState, Gesture); 5] = [
    (FingerState::new([F, F, F, F, F]), Gesture::Off),
    (FingerState::new([T, T, T, T, T]), Gesture::On),
    (FingerState::new([F, T, F, F, F]), Gesture::IncreaseSpeed),
    (FingerState::new([F, T, T, T, F]), Gesture::MaximumSpeed),
    (FingerState::new([F, T, T, F, F]), Gesture::DecreaseSpeed),
];

impl Gesture {
    pub fn classify(fingers: FingerState) -> Self {
        GESTURE_TABLE
            .iter()
            .find(|(pattern, _)| *pattern == fingers)
            .map(|(_, gesture)| *gesture)
            .unwrap_or(Gesture::Unknown)
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(fingers: [bool; 5]) -> Gesture {
        Gesture::classify(FingerState::new(fingers))
    }

    #[test]
    fn known_gestures() {
        assert_eq!(classify([F, F, F, F, F]), Gesture::Off);
        assert_eq!(classify([T, T, T, T, T]), Gesture::On);
        assert_eq!(classify([F, T, F, F, F]), Gesture::IncreaseSpeed);
        assert_eq!(classify([F, T, T, T, F]), Gesture::MaximumSpeed);
        assert_eq!(classify([F, T, T, F, F]), Gesture::DecreaseSpeed);
    }

    #[test]
    fn unlisted_pattern_is_unknown() {
        assert_eq!(classify([F, T, T, F, T]), Gesture::Unknown);
        assert_eq!(classify([T, F, F, F, F]), Gesture::Unknown);
    }

    #[test]
    fn every_pattern_is_classified() {
        let mut unknown = 0;
        for bits in 0u8..32 {
            let fingers = std::array::from_fn(|i| bits & (1 << i) != 0);
            let gesture = classify(fingers);

            assert_eq!(gesture, classify(fingers));
            if gesture.is_unknown() {
                unknown += 1;
            }
        }
        assert_eq!(unknown, 32 - GESTURE_TABLE.len());
    }

    #[test]
    fn labels() {
        assert_eq!(Gesture::Off.label(), "OFF");
        assert_eq!(Gesture::On.to_string(), "ON");
        assert_eq!(Gesture::IncreaseSpeed.label(), "Increase Speed");
        assert_eq!(Gesture::MaximumSpeed.label(), "Maximum Speed");
        assert_eq!(Gesture::DecreaseSpeed.label(), "Decrease Speed");
        assert_eq!(Gesture::Unknown.to_string(), "Unknown Gesture");
    }
}
