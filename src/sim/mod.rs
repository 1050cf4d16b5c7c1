//! Frame-driven simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Host time enters only through `frame(now_ms)`
//! - Seeded RNG only
//! - Removal while iterating walks pools back to front

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod player;
pub mod pools;
pub mod pursuer;
pub mod scoring;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Extent, Hitbox, overlaps};
pub use difficulty::SpeedRamp;
pub use player::{Lane, Player};
pub use pools::{BurstKind, Coin, EntityPools, Obstacle, Particle};
pub use pursuer::{Pursuer, PursuerOutcome, threat_level};
pub use scoring::{LifeLossCause, LifeOutcome, Scoreboard};
pub use state::{Command, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{frame, tick};
