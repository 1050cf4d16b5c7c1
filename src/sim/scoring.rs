//! Score and lives bookkeeping

use serde::{Deserialize, Serialize};

use crate::consts::STARTING_LIVES;

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeLossCause {
    /// The pursuer caught the player
    Caught,
    /// The player ran into an obstacle
    Crashed,
}

/// Result of losing a life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeOutcome {
    Survived { lives_left: u8 },
    Depleted,
}

/// Score only grows; lives only shrink (until the next run)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u64,
    lives: u8,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
        }
    }
}

impl Scoreboard {
    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add points, returning the new score
    pub fn award(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Take one life. Never goes below zero.
    pub fn lose_life(&mut self) -> LifeOutcome {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            LifeOutcome::Depleted
        } else {
            LifeOutcome::Survived {
                lives_left: self.lives,
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_lives(&mut self, lives: u8) {
        debug_assert!(lives <= STARTING_LIVES);
        self.lives = lives;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lives_count_down_to_depleted() {
        let mut board = Scoreboard::default();
        assert_eq!(board.lose_life(), LifeOutcome::Survived { lives_left: 2 });
        assert_eq!(board.lose_life(), LifeOutcome::Survived { lives_left: 1 });
        assert_eq!(board.lose_life(), LifeOutcome::Depleted);
        assert_eq!(board.lives(), 0);
        // Floor at zero
        assert_eq!(board.lose_life(), LifeOutcome::Depleted);
        assert_eq!(board.lives(), 0);
    }

    #[test]
    fn test_award_and_reset() {
        let mut board = Scoreboard::default();
        assert_eq!(board.award(10), 10);
        assert_eq!(board.award(50), 60);
        board.lose_life();
        board.reset();
        assert_eq!(board, Scoreboard::default());
    }
}
