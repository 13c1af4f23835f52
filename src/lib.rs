//! Drop Dodge - A single-screen falling-object arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, particles)
//! - `renderer`: WebGPU rendering of a simulation snapshot
//! - `platform`: Input resolution and viewport mapping
//! - `persistence`: Scalar key/value storage (LocalStorage on web)
//! - `ui`: HUD text and the restart control
//! - `audio`: Event-driven sound effects (Web Audio on wasm32)

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Speeds and rates are expressed per tick at `SIM_DT`.
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical play field (4:3), independent of the physical canvas
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 70.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Gap between the player's feet and the bottom edge
    pub const PLAYER_FLOOR_MARGIN: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 7.0;
    /// Animation phase advance per tick while walking
    pub const PLAYER_ANIM_RATE: f32 = 0.25;

    /// Falling object defaults
    pub const OBJECT_HEIGHT: f32 = 30.0;
    pub const OBJECT_MIN_WIDTH: f32 = 30.0;
    pub const OBJECT_MAX_WIDTH: f32 = 60.0;
    pub const OBJECT_MIN_SPEED: f32 = 2.0;
    pub const OBJECT_MAX_SPEED: f32 = 5.0;
    /// Visual scale every object starts at
    pub const OBJECT_BASE_SCALE: f32 = 1.5;
    /// Visual scale a growing object stops at
    pub const OBJECT_MAX_SCALE: f32 = 4.5;
    /// Scale added per tick once a growing object has transformed
    pub const GROWTH_PER_TICK: f32 = 0.02;

    /// Spawner
    pub const SPAWN_INTERVAL_TICKS: u64 = 45;
    /// Smallest horizontal span the player can pass through
    pub const MIN_GAP: f32 = PLAYER_WIDTH;
    /// Tries per candidate before it is skipped
    pub const PLACEMENT_ATTEMPTS: u32 = 10;
    pub const BONUS_CHANCE: f64 = 0.2;
    /// Applied to objects that did not roll Bonus
    pub const GROWING_CHANCE: f64 = 0.15;

    /// Inset applied to both hitboxes so grazes are forgiven
    pub const HITBOX_PADDING: f32 = 8.0;

    /// Scoring
    pub const PASS_SCORE: u64 = 10;
    pub const BONUS_SCORE: u64 = 200;
    pub const SCORE_FLASH_TICKS: u32 = 30;

    /// Particle bursts
    pub const SPARKLE_COUNT: usize = 24;
    pub const EXPLOSION_FIRE_COUNT: usize = 40;
    pub const EXPLOSION_SMOKE_COUNT: usize = 16;
    /// Per-pool cap
    pub const MAX_PARTICLES: usize = 256;
}
