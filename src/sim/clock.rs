//! Frame clock
//!
//! Converts host timestamps (milliseconds) into a delta time measured in
//! 60 fps frames, so 1.0 means "one frame at the reference rate".

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_MS, MAX_DELTA_TIME};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameClock {
    /// Timestamp of the last processed frame (ms)
    pub last_frame_ms: f64,
    /// Normalized delta of the last processed frame
    pub delta_time: f32,
}

impl FrameClock {
    /// Restart timing from `now_ms` (run start)
    pub fn reset(&mut self, now_ms: f64) {
        self.last_frame_ms = now_ms;
        self.delta_time = 0.0;
    }

    /// Record a new frame and return its normalized delta.
    ///
    /// Clamped to `[0, MAX_DELTA_TIME]`: timestamps going backwards yield 0 and
    /// long stalls (hidden tab) cannot teleport entities.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let delta = ((now_ms - self.last_frame_ms) / FRAME_MS) as f32;
        self.last_frame_ms = now_ms;
        self.delta_time = if delta.is_finite() {
            delta.clamp(0.0, MAX_DELTA_TIME)
        } else {
            0.0
        };
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_frame_at_sixty_fps() {
        let mut clock = FrameClock::default();
        clock.reset(1000.0);
        let dt = clock.advance(1000.0 + FRAME_MS);
        assert!((dt - 1.0).abs() < 1e-5);
        assert_eq!(clock.last_frame_ms, 1000.0 + FRAME_MS);
    }

    #[test]
    fn test_high_refresh_rate_halves_delta() {
        let mut clock = FrameClock::default();
        clock.reset(0.0);
        let dt = clock.advance(FRAME_MS / 2.0);
        assert!((dt - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::default();
        clock.reset(0.0);
        assert_eq!(clock.advance(10_000.0), MAX_DELTA_TIME);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::default();
        clock.reset(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
        assert_eq!(clock.last_frame_ms, 400.0);
    }
}
