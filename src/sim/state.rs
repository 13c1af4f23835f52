//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`; there are no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::{ParticlePool, PoolKind};
use super::rect::Rect;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    Playing,
    /// Fatal collision happened; explosion still animating, world frozen
    Exploding,
    /// Explosion finished, game-over panel is up and restart is accepted
    GameOverDisplayed,
}

/// Falling object variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    Normal,
    /// Edible once it has ripened past mid-field
    Bonus,
    /// Slows and swells after crossing the upper third; always fatal
    Growing,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (pixels per tick)
    pub vel_x: f32,
    /// Walk cycle phase, only advances while moving
    pub anim_phase: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (FIELD_WIDTH - PLAYER_WIDTH) / 2.0,
                FIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_FLOOR_MARGIN,
            ),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            vel_x: 0.0,
            anim_phase: 0.0,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Largest legal x
    #[inline]
    pub fn max_x(&self) -> f32 {
        FIELD_WIDTH - self.width
    }
}

/// A falling object entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    /// Top-left corner of the unscaled collision box
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Current descent speed (pixels per tick)
    pub speed: f32,
    /// Speed rolled at spawn
    pub base_speed: f32,
    pub kind: ObjectKind,
    /// One-way: ripened (Bonus) or started growing (Growing)
    pub transformed: bool,
    /// Visual scale, also applied to the hitbox
    pub scale: f32,
    /// Cosmetic rotation (radians)
    pub rotation: f32,
    /// Cosmetic spin (radians per tick)
    pub spin: f32,
}

impl FallingObject {
    pub fn new(id: u32, x: f32, width: f32, speed: f32, kind: ObjectKind) -> Self {
        Self {
            id,
            pos: Vec2::new(x, -OBJECT_HEIGHT),
            width,
            height: OBJECT_HEIGHT,
            speed,
            base_speed: speed,
            kind,
            transformed: false,
            scale: OBJECT_BASE_SCALE,
            rotation: 0.0,
            spin: 0.0,
        }
    }

    /// Unscaled collision footprint
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// A ripe bonus is the only thing the player may touch
    #[inline]
    pub fn is_edible(&self) -> bool {
        self.kind == ObjectKind::Bonus && self.transformed
    }

    /// Advance one tick: fall, spin, and cross variant thresholds
    pub fn advance(&mut self, step: f32) {
        self.pos.y += self.speed * step;
        self.rotation += self.spin * step;

        match self.kind {
            ObjectKind::Normal => {}
            ObjectKind::Bonus => {
                if !self.transformed && self.pos.y >= FIELD_HEIGHT / 2.0 {
                    self.transformed = true;
                }
            }
            ObjectKind::Growing => {
                if !self.transformed && self.pos.y >= FIELD_HEIGHT / 3.0 {
                    self.transformed = true;
                    self.speed = self.base_speed / 2.0;
                } else if self.transformed && self.scale < OBJECT_MAX_SCALE {
                    self.scale = (self.scale + GROWTH_PER_TICK * step).min(OBJECT_MAX_SCALE);
                }
            }
        }
    }

    /// Past the bottom edge
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.pos.y >= FIELD_HEIGHT
    }
}

/// Score bookkeeping for the current run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    /// Best score across runs; survives resets
    pub high_score: u64,
    pub phase: RunPhase,
    /// Ticks left on the cosmetic score flash
    pub score_flash: u32,
    /// This run's crash beat the previous best (a tie does not count)
    pub new_best: bool,
}

impl RunState {
    pub fn new(high_score: u64) -> Self {
        Self {
            score: 0,
            high_score,
            phase: RunPhase::Playing,
            score_flash: 0,
            new_best: false,
        }
    }

    /// True once a fatal collision has happened
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase != RunPhase::Playing
    }
}

/// Something the host may want to react to (sound, persistence, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An object left the bottom of the field
    ObjectPassed { id: u32 },
    /// A ripe bonus was eaten
    BonusCollected { id: u32 },
    /// Fatal collision with the given object
    Crashed { id: u32, score: u64 },
    /// The crash set a new best
    NewHighScore { score: u64 },
    /// Explosion finished; restart is now accepted
    GameOverShown,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter (reset with the run)
    pub time_ticks: u64,
    pub player: Player,
    /// Falling objects in spawn order (oldest first)
    pub objects: Vec<FallingObject>,
    /// Bonus pickup sparkles
    pub sparkles: ParticlePool,
    /// Crash fire and smoke
    pub explosion: ParticlePool,
    pub run: RunState,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and the stored best score
    pub fn new(seed: u64, high_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            player: Player::default(),
            objects: Vec::new(),
            sparkles: ParticlePool::new(PoolKind::Sparkle),
            explosion: ParticlePool::new(PoolKind::Explosion),
            run: RunState::new(high_score),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh run. Only accepted after a fatal collision; returns
    /// whether the reset happened. The RNG keeps its stream so consecutive
    /// runs differ.
    pub fn reset(&mut self) -> bool {
        if !self.run.is_terminal() {
            return false;
        }

        self.objects.clear();
        self.sparkles.clear();
        self.explosion.clear();
        self.events.clear();
        self.player = Player::default();
        self.run = RunState::new(self.run.high_score);
        self.time_ticks = 0;

        log::info!("Run reset (high score {})", self.run.high_score);
        true
    }
}
