//! Game state and core simulation types
//!
//! One owned context holds everything a run needs; hosts pass it explicitly
//! to `frame`/`tick` and read it back through `snapshot`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::FrameClock;
use super::difficulty::SpeedRamp;
use super::player::Player;
use super::pools::{Coin, EntityPools, Obstacle, Particle};
use super::pursuer::Pursuer;
use super::scoring::{LifeLossCause, Scoreboard};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing moves
    Idle,
    /// Active run
    Running,
    /// Out of lives; frozen until restart
    GameOver,
}

/// Something the UI should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    ObstaclePassed { score: u64 },
    CoinCollected { score: u64 },
    LifeLost { cause: LifeLossCause, lives_left: u8 },
    GameOver { final_score: u64 },
}

/// Player command from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Jump
    MoveForward,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    pub clock: FrameClock,
    pub ramp: SpeedRamp,
    pub scoreboard: Scoreboard,
    pub player: Player,
    pub pursuer: Pursuer,
    pub pools: EntityPools,
    /// Simulation time of the current run, in 60 fps frames
    pub elapsed: f32,
    /// Updates processed in the current run
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Undrained events; see `drain_events`
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game with default settings
    pub fn new(seed: u64) -> Self {
        Self::build(Settings::default(), seed)
    }

    /// Create an idle game with custom settings
    pub fn with_settings(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::build(settings, seed))
    }

    fn build(settings: Settings, seed: u64) -> Self {
        Self {
            ramp: SpeedRamp::new(&settings),
            settings,
            phase: GamePhase::Idle,
            clock: FrameClock::default(),
            scoreboard: Scoreboard::default(),
            player: Player::default(),
            pursuer: Pursuer::default(),
            pools: EntityPools::default(),
            elapsed: 0.0,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Begin a fresh run at host time `now_ms`.
    ///
    /// Returns true when the host has to schedule a new frame loop, i.e. no
    /// loop was running. Restarting a live run reuses the existing loop.
    pub fn start(&mut self, now_ms: f64) -> bool {
        let needs_loop = self.phase != GamePhase::Running;

        self.phase = GamePhase::Running;
        self.clock.reset(now_ms);
        self.ramp.reset();
        self.scoreboard.reset();
        self.player = Player::default();
        self.pursuer.reset(self.player.pos.x);
        self.pools.clear();
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.events.clear();
        self.events.push(GameEvent::RunStarted);

        log::info!("Run started (seed {})", self.seed);
        needs_loop
    }

    /// Alias of `start`
    pub fn restart(&mut self, now_ms: f64) -> bool {
        self.start(now_ms)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn move_left(&mut self) -> bool {
        self.is_running() && self.player.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.is_running() && self.player.move_right()
    }

    /// Jump
    pub fn move_forward(&mut self) -> bool {
        self.is_running() && self.player.jump()
    }

    /// Dispatch a command; returns whether it changed anything
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveForward => self.move_forward(),
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.scoreboard.score()
    }

    #[inline]
    pub fn lives(&self) -> u8 {
        self.scoreboard.lives()
    }

    /// Take the events recorded since the last drain.
    ///
    /// Nothing else empties the buffer while a run lasts, so hosts should call
    /// this every frame.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            score: self.score(),
            lives: self.lives(),
            current_speed: self.ramp.current(),
            delta_time: self.clock.delta_time,
            width: self.settings.width,
            height: self.settings.height,
            player: &self.player,
            pursuer: &self.pursuer,
            obstacles: &self.pools.obstacles,
            coins: &self.pools.coins,
            particles: &self.pools.particles,
        }
    }
}

/// Read-only view for presentation
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub current_speed: f32,
    pub delta_time: f32,
    pub width: f32,
    pub height: f32,
    pub player: &'a Player,
    pub pursuer: &'a Pursuer,
    pub obstacles: &'a [Obstacle],
    pub coins: &'a [Coin],
    pub particles: &'a [Particle],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::player::Lane;

    #[test]
    fn test_new_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.lives(), STARTING_LIVES);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_commands_ignored_until_running() {
        let mut state = GameState::new(1);
        assert!(!state.move_left());
        assert!(!state.move_forward());
        assert_eq!(state.player.lane, Lane::CENTER);

        state.start(0.0);
        assert!(state.apply(Command::MoveLeft));
        assert!(!state.apply(Command::MoveLeft));
        assert!(state.apply(Command::MoveForward));
        assert_eq!(state.player.lane, Lane::LEFT);
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = GameState::new(1);
        assert!(state.start(0.0));
        state.scoreboard.award(120);
        state.scoreboard.lose_life();
        state.player.move_right();
        state.pools.spawn_obstacle(Lane::LEFT, 100.0);
        state.pools.spawn_coin(Lane::LEFT, 100.0);
        state.pursuer.pos.y = 300.0;

        // Restarting a live run does not need a second loop
        assert!(!state.restart(500.0));
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), STARTING_LIVES);
        assert_eq!(state.ramp.current(), state.settings.base_speed);
        assert_eq!(state.player.lane, Lane::CENTER);
        assert_eq!(state.pursuer.pos.y, PURSUER_START_Y);
        assert_eq!(state.pursuer.pos.x, state.player.pos.x);
        assert!(state.pools.obstacles.is_empty());
        assert!(state.pools.coins.is_empty());
        assert_eq!(state.clock.last_frame_ms, 500.0);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_with_settings_validates() {
        let bad = Settings {
            obstacle_chance: -0.1,
            ..Default::default()
        };
        assert!(GameState::with_settings(bad, 1).is_err());
        assert!(GameState::with_settings(Settings::default(), 1).is_ok());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(9);
        state.start(0.0);
        state.pools.spawn_coin(Lane::RIGHT, 10.0);
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["phase"], "Running");
        assert_eq!(json["lives"], 3);
        assert_eq!(json["coins"].as_array().map(|c| c.len()), Some(1));
        assert_eq!(json["player"]["lane"], 1);
    }
}
