//! Speed ramp
//!
//! One scalar drives how fast the world scrolls: obstacles and coins fall at
//! the current speed and the pursuer advances at a fraction of it.

use serde::{Deserialize, Serialize};

use crate::settings::{Settings, SpeedRampMode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedRamp {
    pub base: f32,
    pub increase: f32,
    pub mode: SpeedRampMode,
    current: f32,
}

impl SpeedRamp {
    pub fn new(settings: &Settings) -> Self {
        Self {
            base: settings.base_speed,
            increase: settings.speed_increase,
            mode: settings.speed_ramp,
            current: settings.base_speed,
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Back to base speed (run start)
    pub fn reset(&mut self) {
        self.current = self.base;
    }

    /// Apply one update's worth of acceleration
    pub fn advance(&mut self, dt: f32) {
        let step = match self.mode {
            SpeedRampMode::PerTick => self.increase,
            SpeedRampMode::FrameScaled => self.increase * dt.max(0.0),
        };
        self.current += step;
        debug_assert!(self.current >= self.base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_tick_ignores_delta() {
        let mut ramp = SpeedRamp::new(&Settings::default());
        ramp.advance(0.5);
        ramp.advance(2.0);
        assert!((ramp.current() - 5.002).abs() < 1e-5);
    }

    #[test]
    fn test_frame_scaled_follows_delta() {
        let settings = Settings {
            speed_ramp: SpeedRampMode::FrameScaled,
            ..Default::default()
        };
        let mut ramp = SpeedRamp::new(&settings);
        ramp.advance(0.5);
        ramp.advance(0.5);
        assert!((ramp.current() - 5.001).abs() < 1e-5);
    }

    #[test]
    fn test_reset_returns_to_base() {
        let mut ramp = SpeedRamp::new(&Settings::default());
        for _ in 0..100 {
            ramp.advance(1.0);
        }
        assert!(ramp.current() > ramp.base);
        ramp.reset();
        assert_eq!(ramp.current(), ramp.base);
    }
}
