//! Entity pools: obstacles, coins and particles
//!
//! Obstacles and coins spawn above the arena in a random lane and fall at the
//! world speed. Particles are short-lived bursts that fall under gravity.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Extent, Hitbox};
use super::player::Lane;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: Lane,
    pub pos: Vec2,
}

impl Obstacle {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(
            self.pos,
            Extent::Rect {
                width: OBSTACLE_WIDTH,
                height: OBSTACLE_HEIGHT,
            },
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub lane: Lane,
    pub pos: Vec2,
    /// Spin angle (radians), presentation only
    pub rotation: f32,
}

impl Coin {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(
            self.pos,
            Extent::Circle {
                radius: COIN_RADIUS,
            },
        )
    }
}

/// Particle burst flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstKind {
    /// Obstacle crash or pursuer catch
    Explosion,
    /// Coin pickup
    Sparkle,
}

impl BurstKind {
    pub fn count(self) -> usize {
        match self {
            BurstKind::Explosion => EXPLOSION_PARTICLES,
            BurstKind::Sparkle => SPARKLE_PARTICLES,
        }
    }

    /// Max velocity component magnitude
    fn spread(self) -> f32 {
        match self {
            BurstKind::Explosion => 5.0,
            BurstKind::Sparkle => 4.0,
        }
    }

    /// (min size, size range)
    fn size(self) -> (f32, f32) {
        match self {
            BurstKind::Explosion => (2.0, 5.0),
            BurstKind::Sparkle => (2.0, 3.0),
        }
    }

    fn life(self) -> f32 {
        match self {
            BurstKind::Explosion => 30.0,
            BurstKind::Sparkle => 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Remaining life in frames
    pub life: f32,
    pub max_life: f32,
    /// Color hue in degrees (reds/oranges for explosions, gold for sparkles)
    pub hue: f32,
    pub kind: BurstKind,
}

impl Particle {
    /// Opacity for fading out
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Live entities of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityPools {
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl EntityPools {
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.coins.clear();
        self.particles.clear();
    }

    fn next_entity_id(&mut self) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    /// Add an obstacle in `lane` at height `y`
    pub fn spawn_obstacle(&mut self, lane: Lane, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            lane,
            pos: Vec2::new(lane.x(), y),
        });
        id
    }

    /// Add a coin in `lane` at height `y`
    pub fn spawn_coin(&mut self, lane: Lane, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.coins.push(Coin {
            id,
            lane,
            pos: Vec2::new(lane.x(), y),
            rotation: 0.0,
        });
        id
    }

    /// Roll the per-frame spawn chances (scaled by `dt`)
    pub fn roll_spawns<R: Rng>(
        &mut self,
        obstacle_chance: f32,
        coin_chance: f32,
        dt: f32,
        rng: &mut R,
    ) {
        if rng.random::<f32>() < (obstacle_chance * dt).min(1.0) {
            let lane = random_lane(rng);
            self.spawn_obstacle(lane, SPAWN_Y);
        }
        if rng.random::<f32>() < (coin_chance * dt).min(1.0) {
            let lane = random_lane(rng);
            self.spawn_coin(lane, SPAWN_Y);
        }
    }

    /// Emit a particle burst at `at`, respecting the pool cap
    pub fn burst<R: Rng>(&mut self, kind: BurstKind, at: Vec2, cap: usize, rng: &mut R) {
        let room = cap.saturating_sub(self.particles.len());
        let spread = kind.spread();
        let (min_size, size_range) = kind.size();
        let life = kind.life();

        for _ in 0..kind.count().min(room) {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0 * spread,
                (rng.random::<f32>() - 0.5) * 2.0 * spread,
            );
            let hue = match kind {
                BurstKind::Explosion => rng.random::<f32>() * 60.0,
                BurstKind::Sparkle => 51.0,
            };
            self.particles.push(Particle {
                pos: at,
                vel,
                size: min_size + rng.random::<f32>() * size_range,
                life,
                max_life: life,
                hue,
                kind,
            });
        }
    }

    /// Move particles under gravity and drop the expired ones
    pub fn update_particles(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel.y += PARTICLE_GRAVITY * dt;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

fn random_lane<R: Rng>(rng: &mut R) -> Lane {
    Lane::ALL[rng.random_range(0..Lane::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_positions() {
        let mut pools = EntityPools::default();
        let a = pools.spawn_obstacle(Lane::LEFT, SPAWN_Y);
        let b = pools.spawn_coin(Lane::RIGHT, SPAWN_Y);
        assert_ne!(a, b);
        assert_eq!(pools.obstacles[0].pos, Vec2::new(LANE_XS[0], SPAWN_Y));
        assert_eq!(pools.coins[0].pos, Vec2::new(LANE_XS[2], SPAWN_Y));
    }

    #[test]
    fn test_spawn_rates() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut pools = EntityPools::default();
        for _ in 0..10_000 {
            pools.roll_spawns(0.02, 0.015, 1.0, &mut rng);
        }
        // Expect ~200 obstacles and ~150 coins
        assert!((140..260).contains(&pools.obstacles.len()));
        assert!((100..200).contains(&pools.coins.len()));
        assert!(pools.obstacles.iter().all(|o| o.pos.x == o.lane.x()));
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pools = EntityPools::default();
        for _ in 0..1000 {
            pools.roll_spawns(0.0, 0.0, 1.0, &mut rng);
        }
        assert!(pools.obstacles.is_empty());
        assert!(pools.coins.is_empty());
    }

    #[test]
    fn test_burst_counts_and_cap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pools = EntityPools::default();
        pools.burst(BurstKind::Explosion, Vec2::ZERO, 256, &mut rng);
        assert_eq!(pools.particles.len(), 20);
        pools.burst(BurstKind::Sparkle, Vec2::ZERO, 256, &mut rng);
        assert_eq!(pools.particles.len(), 30);
        pools.burst(BurstKind::Explosion, Vec2::ZERO, 35, &mut rng);
        assert_eq!(pools.particles.len(), 35);
        assert!(pools.particles.iter().all(|p| p.vel.x.abs() <= 5.0 && p.size >= 2.0));
    }

    #[test]
    fn test_particles_fall_and_expire() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pools = EntityPools::default();
        pools.burst(BurstKind::Sparkle, Vec2::ZERO, 256, &mut rng);
        let before: Vec<f32> = pools.particles.iter().map(|p| p.vel.y).collect();
        pools.update_particles(1.0);
        for (p, vy) in pools.particles.iter().zip(before) {
            assert!((p.vel.y - (vy + PARTICLE_GRAVITY)).abs() < 1e-5);
            assert!((p.alpha() - 19.0 / 20.0).abs() < 1e-6);
        }
        for _ in 0..18 {
            pools.update_particles(1.0);
        }
        assert_eq!(pools.particles.len(), 10);
        pools.update_particles(1.0);
        assert!(pools.particles.is_empty());
    }
}
