mod hand_landmarker;
mod recorded;

pub use hand_landmarker::{HandLandmarker, HandPrediction, HandPreds};
pub use recorded::RecordedLandmarks;
