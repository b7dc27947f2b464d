//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Entities resolved in reverse spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod player;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Circle, HitShape, Rect, entity_hits, hit_shape};
pub use player::Player;
pub use progression::Progression;
pub use spawn::{SpawnCategory, roll_category, spawn_entity, update_spawner};
pub use state::{
    Arena, Entity, EntityKind, GameEvent, GamePhase, GameState, HazardKind, PickupKind, Session,
};
pub use tick::{TickInput, apply_hazard, collect_pickup, damage_player, tick};
