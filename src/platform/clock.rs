//! Frame delta from wall-clock timestamps

use crate::consts::MAX_FRAME_DT;

/// Turns successive frame timestamps into a clamped delta
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Seconds since the previous call, clamped to `[0, max_dt]`
    ///
    /// The first call has no previous timestamp and yields 0.
    pub fn delta(&mut self, now_secs: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now_secs - last) as f32,
            None => 0.0,
        };
        self.last = Some(now_secs);
        dt.clamp(0.0, self.max_dt)
    }
}
