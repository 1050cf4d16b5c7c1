//! Per-frame simulation update
//!
//! Order of work each update: speed ramp, player, pursuer, obstacles, coins,
//! spawning, particles. A run that runs out of lives stops mid-update; the
//! rest of the frame is not processed.

use super::collision::overlaps;
use super::pools::BurstKind;
use super::pursuer::PursuerOutcome;
use super::scoring::{LifeLossCause, LifeOutcome};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Host frame callback: measure the frame, then update once.
///
/// Returns whether the host should schedule another frame. Nothing happens
/// (no time accrues) unless the game is running. Events pile up in the state
/// until the host calls `GameState::drain_events`, so drain once per frame.
pub fn frame(state: &mut GameState, now_ms: f64) -> bool {
    if !state.is_running() {
        return false;
    }
    let dt = state.clock.advance(now_ms);
    tick(state, dt);
    state.is_running()
}

/// Advance the running game by `dt` (in 60 fps frames)
pub fn tick(state: &mut GameState, dt: f32) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    state.ramp.advance(dt);
    state.player.update(dt, state.elapsed);

    let outcome = state.pursuer.update(
        &state.player,
        state.ramp.current(),
        state.settings.height,
        dt,
        &mut state.rng,
    );
    if outcome == PursuerOutcome::Caught {
        let at = state.player.pos;
        state.pools.burst(
            BurstKind::Explosion,
            at,
            state.settings.particle_cap(),
            &mut state.rng,
        );
        if lose_life(state, LifeLossCause::Caught) {
            return;
        }
    }

    if update_obstacles(state, dt) {
        return;
    }
    update_coins(state, dt);

    state.pools.roll_spawns(
        state.settings.obstacle_chance,
        state.settings.coin_chance,
        dt,
        &mut state.rng,
    );
    state.pools.update_particles(dt);

    debug_assert!(state.ramp.current() >= state.ramp.base);
    debug_assert!(state.lives() > 0 && state.lives() <= STARTING_LIVES);
}

/// Move obstacles, resolve crashes and pass-throughs.
/// Returns true if the run ended.
fn update_obstacles(state: &mut GameState, dt: f32) -> bool {
    let fall = state.ramp.current() * dt;
    let exit_y = state.settings.height + EXIT_MARGIN;
    let cap = state.settings.particle_cap();

    // Reverse order keeps the remaining indices valid while removing
    for i in (0..state.pools.obstacles.len()).rev() {
        state.pools.obstacles[i].pos.y += fall;
        let obstacle = &state.pools.obstacles[i];

        if !state.player.is_protected()
            && overlaps(
                &state.player.hitbox(),
                state.player.jump_height,
                &obstacle.hitbox(),
            )
        {
            let at = obstacle.pos;
            state.pools.obstacles.remove(i);
            state
                .pools
                .burst(BurstKind::Explosion, at, cap, &mut state.rng);
            if lose_life(state, LifeLossCause::Crashed) {
                return true;
            }
            continue;
        }

        if obstacle.pos.y > exit_y {
            state.pools.obstacles.remove(i);
            let score = state.scoreboard.award(OBSTACLE_PASS_SCORE);
            state.events.push(GameEvent::ObstaclePassed { score });
        }
    }
    false
}

/// Move coins, resolve pickups. Coins can be collected mid-jump.
fn update_coins(state: &mut GameState, dt: f32) {
    let fall = state.ramp.current() * dt;
    let exit_y = state.settings.height + EXIT_MARGIN;
    let cap = state.settings.particle_cap();

    for i in (0..state.pools.coins.len()).rev() {
        let coin = &mut state.pools.coins[i];
        coin.pos.y += fall;
        coin.rotation += COIN_SPIN * dt;
        let coin = &state.pools.coins[i];

        if overlaps(
            &state.player.hitbox(),
            state.player.jump_height,
            &coin.hitbox(),
        ) {
            let at = coin.pos;
            state.pools.coins.remove(i);
            let score = state.scoreboard.award(COIN_SCORE);
            state.events.push(GameEvent::CoinCollected { score });
            state.pools.burst(BurstKind::Sparkle, at, cap, &mut state.rng);
            continue;
        }

        if coin.pos.y > exit_y {
            state.pools.coins.remove(i);
        }
    }
}

/// Take a life; on the last one, end the run. Returns true if the run ended.
fn lose_life(state: &mut GameState, cause: LifeLossCause) -> bool {
    match state.scoreboard.lose_life() {
        LifeOutcome::Survived { lives_left } => {
            log::debug!("Life lost ({:?}), {} left", cause, lives_left);
            state.player.grant_invincibility(state.elapsed);
            state.events.push(GameEvent::LifeLost { cause, lives_left });
            false
        }
        LifeOutcome::Depleted => {
            let final_score = state.score();
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::LifeLost {
                cause,
                lives_left: 0,
            });
            state.events.push(GameEvent::GameOver { final_score });
            log::info!("Game over: score {}", final_score);
            true
        }
    }
}
