//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, resolve_ship_collisions};
pub use rect::Rect;
pub use state::{
    Arena, GameEvent, GamePhase, GameState, Meteor, MeteorKind, Shield, Spaceship, Star,
};
pub use tick::{TickInput, tick};
