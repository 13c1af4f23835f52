//! Particle pools for visual effects
//!
//! Two independent pools: pickup sparkles and crash explosion (fire + smoke).
//! Particles are cosmetic, but the explosion pool draining is what moves a run
//! from `Exploding` to `GameOverDisplayed`, so they are simulated, not rendered-only.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{EXPLOSION_FIRE_COUNT, EXPLOSION_SMOKE_COUNT, MAX_PARTICLES, SPARKLE_COUNT};

/// Downward pull on explosion fire (pixels per tick²)
const FIRE_GRAVITY: f32 = 0.12;
/// Upward drift on smoke (pixels per tick²)
const SMOKE_LIFT: f32 = 0.05;
/// Smoke puff growth (pixels per tick)
const SMOKE_GROWTH: f32 = 0.15;

const SPARKLE_COLORS: [u32; 3] = [0xFFD700FF, 0xFFF3A0FF, 0xFFFFFFFF];
const FIRE_COLORS: [u32; 3] = [0xFF4500FF, 0xFF8C00FF, 0xFFD000FF];
const SMOKE_COLOR: u32 = 0x505050FF;

/// Which effect a pool holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolKind {
    Sparkle,
    Explosion,
}

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0-1, decreases by `decay` every tick
    pub life: f32,
    pub decay: f32,
    /// RGBA, 8 bits per channel
    pub color: u32,
    /// Velocity multiplier per tick
    pub friction: f32,
    /// Explosion only: rises and swells instead of falling
    pub is_smoke: bool,
}

/// A pool of particles of one effect kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlePool {
    pub kind: PoolKind,
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new(kind: PoolKind) -> Self {
        Self {
            kind,
            particles: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Add a particle unless the pool is full
    pub fn push(&mut self, particle: Particle) {
        if self.particles.len() < MAX_PARTICLES {
            self.particles.push(particle);
        }
    }

    /// Advance every particle and drop the dead ones
    pub fn update(&mut self, step: f32) {
        let kind = self.kind;
        for p in self.particles.iter_mut() {
            p.pos += p.vel * step;
            p.vel *= p.friction.powf(step);

            match kind {
                PoolKind::Sparkle => {}
                PoolKind::Explosion => {
                    if p.is_smoke {
                        p.vel.y -= SMOKE_LIFT * step;
                        p.size += SMOKE_GROWTH * step;
                    } else {
                        p.vel.y += FIRE_GRAVITY * step;
                    }
                }
            }

            p.life -= p.decay * step;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Golden burst where a bonus was eaten
    pub fn spawn_sparkles(&mut self, rng: &mut impl Rng, center: Vec2) {
        for i in 0..SPARKLE_COUNT {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(1.0..4.5);
            self.push(Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                size: rng.random_range(2.0..5.0),
                life: 1.0,
                decay: rng.random_range(0.02..0.04),
                color: SPARKLE_COLORS[i % SPARKLE_COLORS.len()],
                friction: 0.94,
                is_smoke: false,
            });
        }
    }

    /// Fire and smoke burst at the crash site
    pub fn spawn_explosion(&mut self, rng: &mut impl Rng, center: Vec2) {
        for i in 0..EXPLOSION_FIRE_COUNT {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(2.0..8.0);
            self.push(Particle {
                pos: center,
                // Bias upward so the burst arcs before gravity wins
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 2.0),
                size: rng.random_range(3.0..7.0),
                life: 1.0,
                decay: rng.random_range(0.012..0.025),
                color: FIRE_COLORS[i % FIRE_COLORS.len()],
                friction: 0.96,
                is_smoke: false,
            });
        }
        for _ in 0..EXPLOSION_SMOKE_COUNT {
            let offset = Vec2::new(rng.random_range(-15.0..15.0), rng.random_range(-10.0..10.0));
            self.push(Particle {
                pos: center + offset,
                vel: Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.5..0.0)),
                size: rng.random_range(6.0..12.0),
                life: 1.0,
                decay: rng.random_range(0.008..0.016),
                color: SMOKE_COLOR,
                friction: 0.98,
                is_smoke: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(is_smoke: bool) -> Particle {
        Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            size: 5.0,
            life: 1.0,
            decay: 0.1,
            color: SMOKE_COLOR,
            friction: 1.0,
            is_smoke,
        }
    }

    #[test]
    fn test_particle_removed_when_life_runs_out() {
        let mut pool = ParticlePool::new(PoolKind::Sparkle);
        pool.push(particle(false));
        for _ in 0..9 {
            pool.update(1.0);
        }
        assert_eq!(pool.len(), 1);
        // Tenth decrement brings life to ~0.0
        pool.update(1.0);
        pool.update(1.0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_fire_falls_and_smoke_rises() {
        let mut pool = ParticlePool::new(PoolKind::Explosion);
        pool.push(particle(false));
        pool.push(particle(true));
        pool.update(1.0);
        pool.update(1.0);

        let fire = pool.iter().find(|p| !p.is_smoke).unwrap();
        let smoke = pool.iter().find(|p| p.is_smoke).unwrap();
        assert!(fire.pos.y > 100.0);
        assert!(smoke.pos.y < 100.0);
        assert!(smoke.size > 5.0);
        assert_eq!(fire.size, 5.0);
    }

    #[test]
    fn test_sparkles_ignore_gravity() {
        let mut pool = ParticlePool::new(PoolKind::Sparkle);
        pool.push(particle(false));
        pool.update(1.0);
        assert_eq!(pool.iter().next().unwrap().pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_friction_damps_velocity() {
        let mut pool = ParticlePool::new(PoolKind::Sparkle);
        let mut p = particle(false);
        p.vel = Vec2::new(10.0, 0.0);
        p.friction = 0.5;
        pool.push(p);
        pool.update(1.0);
        let p = pool.iter().next().unwrap();
        assert_eq!(p.pos.x, 110.0);
        assert!((p.vel.x - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_bursts_fill_pools_and_respect_cap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut sparkles = ParticlePool::new(PoolKind::Sparkle);
        sparkles.spawn_sparkles(&mut rng, Vec2::new(400.0, 300.0));
        assert_eq!(sparkles.len(), SPARKLE_COUNT);

        let mut explosion = ParticlePool::new(PoolKind::Explosion);
        explosion.spawn_explosion(&mut rng, Vec2::new(400.0, 550.0));
        assert_eq!(explosion.len(), EXPLOSION_FIRE_COUNT + EXPLOSION_SMOKE_COUNT);
        assert_eq!(
            explosion.iter().filter(|p| p.is_smoke).count(),
            EXPLOSION_SMOKE_COUNT
        );

        for _ in 0..100 {
            sparkles.spawn_sparkles(&mut rng, Vec2::ZERO);
        }
        assert_eq!(sparkles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_explosion_eventually_drains() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut pool = ParticlePool::new(PoolKind::Explosion);
        pool.spawn_explosion(&mut rng, Vec2::new(400.0, 550.0));
        // Slowest decay is 0.008 per tick
        for _ in 0..130 {
            pool.update(1.0);
        }
        assert!(pool.is_empty());
    }
}
