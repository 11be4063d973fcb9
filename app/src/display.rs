use std::time::Instant;

use error_stack::Result;
use log::{debug, info};

use crate::{traits::DisplaySink, GError, ImageFrame};

pub const QUIT_HINT: &str = "Press 'q' to quit";

/// Text lines drawn over a frame.
pub fn overlay_text(fps: f32, gesture: &str) -> [String; 3] {
    [
        format!("FPS: {}", fps as u32),
        format!("Gesture: {gesture}"),
        QUIT_HINT.to_string(),
    ]
}

/// Frames per second from the gap between two consecutive ticks.
#[derive(Debug, Default)]
pub struct FpsCounter {
    prev: Option<Instant>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns 0.0 on the first tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let fps = match self.prev {
            Some(prev) => {
                let dt = now.duration_since(prev).as_secs_f32();
                if dt > 0.0 {
                    1.0 / dt
                } else {
                    0.0
                }
            }
            None => 0.0,
        };
        self.prev = Some(now);
        fps
    }
}

/// Headless sink that writes the overlay to the log.
#[derive(Debug, Default)]
pub struct LogDisplay {
    last_gesture: Option<String>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySink for LogDisplay {
    fn show(&mut self, frame: &ImageFrame, fps: f32, gesture: &str) -> Result<(), GError> {
        let [fps_line, gesture_line, _] = overlay_text(fps, gesture);

        if self.last_gesture.as_deref() != Some(gesture) {
            info!("{gesture_line}");
            self.last_gesture = Some(gesture.to_string());
        }
        debug!(
            "{fps_line} | {gesture_line} | {}x{} frame",
            frame.width, frame.height
        );

        Ok(())
    }
}
