//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod particles;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Contact, find_contact, object_hitbox, player_hitbox};
pub use particles::{Particle, ParticlePool, PoolKind};
pub use rect::Rect;
pub use spawner::{ensure_passable, has_passable_gap, place_spans, spawn_row};
pub use state::{FallingObject, GameEvent, GameState, ObjectKind, Player, RunPhase, RunState};
pub use tick::{TickInput, tick};
