//! Pursuer AI
//!
//! The gorilla runs down the screen toward the player, lunging when close,
//! and lazily tracks the player's x. It never leaves for good: once it falls
//! off the bottom it reappears above the arena near the player.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub pos: Vec2,
    /// 0 when far, approaching 1 as the gap to the player closes
    pub threat: f32,
}

impl Default for Pursuer {
    fn default() -> Self {
        Self {
            pos: Vec2::new(LANE_XS[1], PURSUER_START_Y),
            threat: 0.0,
        }
    }
}

/// What the pursuer did this update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuerOutcome {
    Chasing,
    /// Caught the player; the pursuer has been thrown back above the arena
    Caught,
    /// Fell off the bottom and reappeared above the player
    Respawned,
}

impl Pursuer {
    /// Place above the arena, lined up with the player (run start)
    pub fn reset(&mut self, player_x: f32) {
        self.pos = Vec2::new(player_x, PURSUER_START_Y);
        self.threat = 0.0;
    }

    /// Vertical speed for the current world speed
    pub fn vertical_speed(&self, player: &Player, world_speed: f32) -> f32 {
        let gap = player.pos.y - self.pos.y;
        if gap < PURSUER_LUNGE_DISTANCE {
            world_speed * PURSUER_LUNGE_FACTOR
        } else {
            world_speed * PURSUER_CRUISE_FACTOR
        }
    }

    /// Inside the catch band and within reach of the player
    pub fn can_catch(&self, player: &Player) -> bool {
        let in_band = self.pos.y > player.pos.y - CATCH_BAND_ABOVE
            && self.pos.y < player.pos.y + CATCH_BAND_BELOW;
        in_band && (self.pos.x - player.pos.x).abs() < CATCH_REACH && !player.is_protected()
    }

    /// Advance the chase by one update
    pub fn update<R: Rng>(
        &mut self,
        player: &Player,
        world_speed: f32,
        arena_height: f32,
        dt: f32,
        rng: &mut R,
    ) -> PursuerOutcome {
        self.pos.y += self.vertical_speed(player, world_speed) * dt;
        let ease = (PURSUER_CHASE_EASING * dt).min(1.0);
        self.pos.x += (player.pos.x - self.pos.x) * ease;

        let outcome = if self.can_catch(player) {
            self.pos.y = PURSUER_CATCH_RESET_Y;
            PursuerOutcome::Caught
        } else if self.pos.y > arena_height + PURSUER_OFFSCREEN_MARGIN {
            let offset = (rng.random::<f32>() - 0.5) * 2.0 * PURSUER_RESPAWN_SPREAD;
            self.pos = Vec2::new(player.pos.x + offset, PURSUER_RESPAWN_Y);
            log::debug!("Pursuer respawned at x={:.0}", self.pos.x);
            PursuerOutcome::Respawned
        } else {
            PursuerOutcome::Chasing
        };

        self.threat = threat_level(self.pos.y, player.pos.y);
        outcome
    }
}

/// Proximity threat in [0, 1]
pub fn threat_level(pursuer_y: f32, player_y: f32) -> f32 {
    let gap = (pursuer_y - player_y).abs();
    if gap < PURSUER_LUNGE_DISTANCE {
        (PURSUER_LUNGE_DISTANCE - gap) / PURSUER_LUNGE_DISTANCE
    } else {
        0.0
    }
}
