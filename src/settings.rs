//! Run settings
//!
//! Tunable parameters for a run. Persisted in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How the speed ramp reacts to frame timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedRampMode {
    /// Fixed increment every update, regardless of frame time.
    /// Difficulty grows faster on high refresh-rate displays.
    #[default]
    PerTick,
    /// Increment scaled by delta time (frame-rate independent)
    FrameScaled,
}

impl SpeedRampMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedRampMode::PerTick => "per-tick",
            SpeedRampMode::FrameScaled => "frame-scaled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per-tick" | "tick" => Some(SpeedRampMode::PerTick),
            "frame-scaled" | "scaled" => Some(SpeedRampMode::FrameScaled),
            _ => None,
        }
    }
}

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub width: f32,
    pub height: f32,

    // === Difficulty ===
    /// Fall speed at run start (units per frame)
    pub base_speed: f32,
    /// Added to the current speed every update
    pub speed_increase: f32,
    pub speed_ramp: SpeedRampMode,

    // === Spawning ===
    /// Per-frame chance of spawning an obstacle
    pub obstacle_chance: f32,
    /// Per-frame chance of spawning a coin
    pub coin_chance: f32,

    // === Effects ===
    pub particles: bool,
    /// Cap on live particles
    pub max_particles: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,

            base_speed: 5.0,
            speed_increase: 0.001,
            speed_ramp: SpeedRampMode::PerTick,

            obstacle_chance: 0.02,
            coin_chance: 0.015,

            particles: true,
            max_particles: 256,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that the settings can drive a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::ArenaSize {
                width: self.width,
                height: self.height,
            });
        }
        // Obstacles and the pursuer must reach the player before leaving
        let min_height = PLAYER_Y + CATCH_BAND_BELOW - EXIT_MARGIN;
        if self.height < min_height {
            return Err(ConfigError::ArenaTooShort {
                height: self.height,
                min_height,
            });
        }
        if let Some(&lane_x) = LANE_XS.iter().find(|&&x| x >= self.width) {
            return Err(ConfigError::LaneOutsideArena {
                lane_x,
                width: self.width,
            });
        }
        for (name, value) in [
            ("obstacle_chance", self.obstacle_chance),
            ("coin_chance", self.coin_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ChanceOutOfRange { name, value });
            }
        }
        if !(self.base_speed > 0.0) {
            return Err(ConfigError::BaseSpeed {
                value: self.base_speed,
            });
        }
        if !(self.speed_increase >= 0.0) {
            return Err(ConfigError::SpeedIncrease {
                value: self.speed_increase,
            });
        }
        Ok(())
    }

    /// Effective particle cap (0 with particles off)
    pub fn particle_cap(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gorilla_dash_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"base_speed": 7.5}"#).unwrap();
        assert_eq!(settings.base_speed, 7.5);
        assert_eq!(settings.width, ARENA_WIDTH);
        assert_eq!(settings.speed_ramp, SpeedRampMode::PerTick);
    }

    #[test]
    fn test_rejects_bad_chance() {
        let err = Settings::from_json(r#"{"coin_chance": 1.5}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ChanceOutOfRange {
                name: "coin_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_narrow_arena() {
        let settings = Settings {
            width: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::LaneOutsideArena { lane_x, .. }) if lane_x == 650.0
        ));
    }

    #[test]
    fn test_rejects_short_arena() {
        let settings = Settings {
            height: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ArenaTooShort { min_height, .. }) if min_height == 500.0
        ));

        let shortest = Settings {
            height: 500.0,
            ..Default::default()
        };
        assert!(shortest.validate().is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Settings::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_ramp_mode_names() {
        for mode in [SpeedRampMode::PerTick, SpeedRampMode::FrameScaled] {
            assert_eq!(SpeedRampMode::from_str(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn test_particles_off_disables_cap() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(settings.particle_cap(), 0);
    }
}
