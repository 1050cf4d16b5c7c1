//! Configuration errors
//!
//! The simulation itself never fails; only externally supplied settings can
//! be rejected.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    ArenaSize { width: f32, height: f32 },
    LaneOutsideArena { lane_x: f32, width: f32 },
    ArenaTooShort { height: f32, min_height: f32 },
    ChanceOutOfRange { name: &'static str, value: f32 },
    BaseSpeed { value: f32 },
    SpeedIncrease { value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid settings json: {err}"),
            Self::ArenaSize { width, height } => {
                write!(f, "arena must be positive, got {width}x{height}")
            }
            Self::LaneOutsideArena { lane_x, width } => {
                write!(f, "lane at x={lane_x} lies outside arena width {width}")
            }
            Self::ArenaTooShort { height, min_height } => {
                write!(f, "arena height {height} is below the minimum of {min_height}")
            }
            Self::ChanceOutOfRange { name, value } => {
                write!(f, "{name} must be within [0, 1], got {value}")
            }
            Self::BaseSpeed { value } => write!(f, "base speed must be positive, got {value}"),
            Self::SpeedIncrease { value } => {
                write!(f, "speed increase must not be negative, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
