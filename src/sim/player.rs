//! Player controller: lane changes, jump arc, brief invincibility

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Extent, Hitbox};
use crate::consts::*;

/// One of the three lanes. Always valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Lane(u8);

impl Lane {
    pub const LEFT: Lane = Lane(0);
    pub const CENTER: Lane = Lane(1);
    pub const RIGHT: Lane = Lane(2);
    pub const ALL: [Lane; 3] = [Lane::LEFT, Lane::CENTER, Lane::RIGHT];

    pub fn from_index(index: usize) -> Option<Self> {
        Lane::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Lane center x
    #[inline]
    pub fn x(self) -> f32 {
        LANE_XS[self.index()]
    }

    pub fn left(self) -> Option<Lane> {
        self.index().checked_sub(1).and_then(Lane::from_index)
    }

    pub fn right(self) -> Option<Lane> {
        Lane::from_index(self.index() + 1)
    }
}

impl TryFrom<u8> for Lane {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Lane::from_index(value as usize).ok_or_else(|| format!("lane {value} out of range"))
    }
}

impl From<Lane> for u8 {
    fn from(lane: Lane) -> u8 {
        lane.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// x eases toward `target_x`; y is the feet line and never changes
    pub pos: Vec2,
    pub lane: Lane,
    pub target_x: f32,
    /// Rising part of the jump arc
    pub jumping: bool,
    pub jump_height: f32,
    /// Simulation time (frames) at which brief invincibility ends
    pub invincible_until: Option<f32>,
}

impl Default for Player {
    fn default() -> Self {
        let lane = Lane::CENTER;
        Self {
            pos: Vec2::new(lane.x(), PLAYER_Y),
            lane,
            target_x: lane.x(),
            jumping: false,
            jump_height: 0.0,
            invincible_until: None,
        }
    }
}

impl Player {
    /// Shift one lane left. No-op in the leftmost lane.
    pub fn move_left(&mut self) -> bool {
        match self.lane.left() {
            Some(lane) => {
                self.set_lane(lane);
                true
            }
            None => false,
        }
    }

    /// Shift one lane right. No-op in the rightmost lane.
    pub fn move_right(&mut self) -> bool {
        match self.lane.right() {
            Some(lane) => {
                self.set_lane(lane);
                true
            }
            None => false,
        }
    }

    fn set_lane(&mut self, lane: Lane) {
        self.lane = lane;
        self.target_x = lane.x();
    }

    /// Start a jump. Only accepted when fully grounded.
    pub fn jump(&mut self) -> bool {
        if !self.jumping && self.jump_height == 0.0 {
            self.jumping = true;
            true
        } else {
            false
        }
    }

    /// Advance easing, the jump arc and the invincibility window
    pub fn update(&mut self, dt: f32, now: f32) {
        if let Some(deadline) = self.invincible_until {
            if now >= deadline {
                self.invincible_until = None;
                self.jumping = false;
            }
        }

        let ease = (LANE_EASING * dt).min(1.0);
        self.pos.x += (self.target_x - self.pos.x) * ease;

        if self.jumping {
            self.jump_height = (self.jump_height + JUMP_STEP * dt).min(MAX_JUMP_HEIGHT);
            if self.jump_height >= MAX_JUMP_HEIGHT {
                self.jumping = false;
            }
        } else if self.jump_height > 0.0 {
            self.jump_height = (self.jump_height - JUMP_STEP * dt).max(0.0);
        }

        debug_assert!((0.0..=MAX_JUMP_HEIGHT).contains(&self.jump_height));
    }

    /// Hop into the air and ignore damage for the invincibility window
    pub fn grant_invincibility(&mut self, now: f32) {
        self.jumping = true;
        self.jump_height = INVINCIBLE_HOP_HEIGHT;
        self.invincible_until = Some(now + INVINCIBILITY_FRAMES);
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    /// Immune to obstacles and the pursuer
    #[inline]
    pub fn is_protected(&self) -> bool {
        self.jumping || self.is_invincible()
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(
            self.pos,
            Extent::Rect {
                width: PLAYER_WIDTH,
                height: PLAYER_HEIGHT,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lane_edges_are_noops() {
        let mut player = Player::default();
        assert!(player.move_left());
        assert!(!player.move_left());
        assert_eq!(player.lane, Lane::LEFT);
        assert_eq!(player.target_x, LANE_XS[0]);

        assert!(player.move_right());
        assert!(player.move_right());
        assert!(!player.move_right());
        assert_eq!(player.lane, Lane::RIGHT);
    }

    #[test]
    fn test_lane_change_eases() {
        let mut player = Player::default();
        player.move_right();
        player.update(1.0, 1.0);
        // One fifth of 250
        assert!((player.pos.x - 450.0).abs() < 1e-3);
        for i in 0..60 {
            player.update(1.0, 2.0 + i as f32);
        }
        assert!((player.pos.x - LANE_XS[2]).abs() < 0.5);
    }

    #[test]
    fn test_jump_arc() {
        let mut player = Player::default();
        assert!(player.jump());

        let mut peak = 0.0f32;
        let mut ticks = 0;
        while player.jumping {
            player.update(1.0, ticks as f32);
            peak = peak.max(player.jump_height);
            ticks += 1;
        }
        assert_eq!(peak, MAX_JUMP_HEIGHT);
        // 18 full steps, the 19th is clipped at the ceiling
        assert_eq!(ticks, 19);

        while player.jump_height > 0.0 {
            player.update(1.0, ticks as f32);
            ticks += 1;
        }
        assert_eq!(player.jump_height, 0.0);
        assert!(player.jump());
    }

    #[test]
    fn test_jump_rejected_mid_arc() {
        let mut player = Player::default();
        assert!(player.jump());
        player.update(1.0, 0.0);
        assert!(!player.jump());
        // Still rejected while falling back down
        player.jumping = false;
        assert!(!player.jump());
    }

    #[test]
    fn test_invincibility_window() {
        let mut player = Player::default();
        player.grant_invincibility(10.0);
        assert!(player.is_protected());
        assert_eq!(player.jump_height, INVINCIBLE_HOP_HEIGHT);

        let mut now = 10.0;
        while now < 10.0 + INVINCIBILITY_FRAMES - 1.0 {
            now += 1.0;
            player.update(1.0, now);
            assert!(player.is_protected());
        }
        player.update(1.0, 10.0 + INVINCIBILITY_FRAMES);
        assert!(!player.is_invincible());
        assert!(!player.jumping);
        assert!(!player.is_protected());
    }

    #[test]
    fn test_lane_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Lane>("3").is_err());
        assert_eq!(serde_json::from_str::<Lane>("2").unwrap(), Lane::RIGHT);
    }

    proptest! {
        #[test]
        fn prop_lane_stays_in_range(moves in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut player = Player::default();
            for left in moves {
                if left { player.move_left(); } else { player.move_right(); }
                prop_assert!(player.lane.index() <= 2);
                prop_assert_eq!(player.target_x, LANE_XS[player.lane.index()]);
            }
        }

        #[test]
        fn prop_jump_never_overshoots(
            presses in proptest::collection::vec(any::<bool>(), 1..200),
            dt in 0.1f32..3.0,
        ) {
            let mut player = Player::default();
            for (i, press) in presses.into_iter().enumerate() {
                if press { player.jump(); }
                player.update(dt, i as f32 * dt);
                prop_assert!(player.jump_height >= 0.0);
                prop_assert!(player.jump_height <= MAX_JUMP_HEIGHT);
            }
        }
    }
}
