//! Frame driver timing
//!
//! Converts host timestamps (milliseconds, e.g. from requestAnimationFrame)
//! into a clamped delta-time so a stall never turns into one huge step.

/// Variable-step clock with an upper bound on delta-time
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous frame, clamped to [0, max_dt].
    /// The first frame after construction or `reset` yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the previous timestamp (used on restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp (ms) and refresh the estimate
    pub fn record(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the slot we will overwrite next
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new(0.033);
        assert_eq!(clock.advance(1234.0), 0.0);
        assert!((clock.advance(1250.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new(0.033);
        clock.advance(0.0);
        assert_eq!(clock.advance(5000.0), 0.033);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new(0.033);
        clock.advance(1000.0);
        assert_eq!(clock.advance(900.0), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
    }

    #[test]
    fn test_reset_forgets_last_frame() {
        let mut clock = FrameClock::new(0.033);
        clock.advance(100.0);
        clock.reset();
        assert_eq!(clock.advance(10_000.0), 0.0);
    }

    #[test]
    fn test_fps_estimate() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(fps.fps(), 60);
    }
}
