//! Gorilla Dash - a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (player, pursuer, entity pools, scoring)
//! - `settings`: Tunable run parameters, persisted in LocalStorage
//! - `highscores`: Local leaderboard
//! - `error`: Configuration errors

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use highscores::HighScores;
pub use settings::{Settings, SpeedRampMode};

/// Game configuration constants
pub mod consts {
    /// Milliseconds per frame at the 60 fps baseline
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest delta time accepted per frame (prevents teleporting after a stall)
    pub const MAX_DELTA_TIME: f32 = 3.0;

    /// Arena defaults
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Lane x-coordinates (left, center, right)
    pub const LANE_XS: [f32; 3] = [150.0, 400.0, 650.0];

    /// Player body (y is the feet line and never changes)
    pub const PLAYER_Y: f32 = 450.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Fraction of the remaining distance to the target lane covered per frame
    pub const LANE_EASING: f32 = 0.2;
    pub const JUMP_STEP: f32 = 8.0;
    pub const MAX_JUMP_HEIGHT: f32 = 150.0;
    /// Lift applied by the invincibility hop after losing a life
    pub const INVINCIBLE_HOP_HEIGHT: f32 = 50.0;
    /// Brief invincibility after a life loss, in 60 fps frames (1 second)
    pub const INVINCIBILITY_FRAMES: f32 = 60.0;

    /// Pursuer (gorilla)
    pub const PURSUER_WIDTH: f32 = 80.0;
    pub const PURSUER_HEIGHT: f32 = 100.0;
    pub const PURSUER_START_Y: f32 = -100.0;
    /// Where the pursuer is thrown back to after catching the player
    pub const PURSUER_CATCH_RESET_Y: f32 = -200.0;
    /// Where the pursuer reappears after running off the bottom
    pub const PURSUER_RESPAWN_Y: f32 = -150.0;
    /// Respawn x spread around the player (+/-)
    pub const PURSUER_RESPAWN_SPREAD: f32 = 100.0;
    pub const PURSUER_CRUISE_FACTOR: f32 = 0.75;
    pub const PURSUER_LUNGE_FACTOR: f32 = 0.95;
    /// Vertical gap below which the pursuer lunges
    pub const PURSUER_LUNGE_DISTANCE: f32 = 150.0;
    pub const PURSUER_CHASE_EASING: f32 = 0.03;
    /// Catch band relative to the player's y: (y - 50, y + 100)
    pub const CATCH_BAND_ABOVE: f32 = 50.0;
    pub const CATCH_BAND_BELOW: f32 = 100.0;
    pub const CATCH_REACH: f32 = 60.0;
    /// How far below the arena the pursuer may fall before respawning
    pub const PURSUER_OFFSCREEN_MARGIN: f32 = 100.0;

    /// Obstacles and coins
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;
    pub const COIN_RADIUS: f32 = 15.0;
    pub const COIN_SPIN: f32 = 0.2;
    pub const SPAWN_Y: f32 = -50.0;
    /// Entities are pruned once y exceeds arena height + this margin
    pub const EXIT_MARGIN: f32 = 50.0;

    /// Scoring
    pub const OBSTACLE_PASS_SCORE: u64 = 10;
    pub const COIN_SCORE: u64 = 50;
    pub const STARTING_LIVES: u8 = 3;

    /// Particles
    pub const PARTICLE_GRAVITY: f32 = 0.3;
    pub const EXPLOSION_PARTICLES: usize = 20;
    pub const SPARKLE_PARTICLES: usize = 10;
}
