//! Frame rate accounting.

use web_time::Duration;

/// Default time between FPS reports
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Accumulates frame durations and yields an average FPS once per interval.
#[derive(Debug)]
pub struct FrameTimer {
    report_interval: Duration,
    elapsed: Duration,
    frames: u32,
    last_fps: Option<f32>,
}

impl FrameTimer {
    pub fn new(report_interval: Duration) -> Self {
        Self {
            report_interval,
            elapsed: Duration::ZERO,
            frames: 0,
            last_fps: None,
        }
    }

    /// Records one frame.
    ///
    /// # Returns
    /// The average FPS over the interval when the interval has just elapsed.
    pub fn record_frame(&mut self, frame_time: Duration) -> Option<f32> {
        self.elapsed += frame_time;
        self.frames += 1;

        if self.elapsed < self.report_interval || self.elapsed.is_zero() {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// The most recently reported FPS.
    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_INTERVAL)
    }
}
