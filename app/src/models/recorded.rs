use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use error_stack::{Result, ResultExt};
use serde::Deserialize;

use crate::{hand::Hand, traits::LandmarkSource, GError, ImageFrame};

#[derive(Deserialize)]
struct RecordedFrame {
    #[serde(default)]
    hands: Vec<Hand>,
}

/// Replays hands recorded as JSON lines, one `{"hands": [...]}` per frame in
/// pixel coordinates. Frames past the end of the recording have no hands.
#[derive(Debug, Default)]
pub struct RecordedLandmarks {
    frames: VecDeque<Vec<Hand>>,
}

impl RecordedLandmarks {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GError> {
        let path = path.as_ref();
        let file = File::open(path)
            .change_context(GError::DetectorError)
            .attach_printable_lazy(|| format!("Couldn't open recording {}", path.display()))?;

        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self, GError> {
        let mut frames = VecDeque::new();

        for (n, line) in reader.lines().enumerate() {
            let line = line.change_context(GError::DetectorError)?;
            if line.trim().is_empty() {
                continue;
            }

            let frame: RecordedFrame = serde_json::from_str(&line)
                .change_context(GError::DetectorError)
                .attach_printable_lazy(|| format!("Bad recording on line {}", n + 1))?;
            frames.push_back(frame.hands);
        }

        Ok(Self { frames })
    }

    pub fn from_frames(frames: impl IntoIterator<Item = Vec<Hand>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for RecordedLandmarks {
    fn detect(&mut self, _frame: &ImageFrame) -> Result<Vec<Hand>, GError> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}
