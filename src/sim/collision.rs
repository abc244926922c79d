//! Collision detection between the ship, its shield and meteors
//!
//! Everything is an axis-aligned rectangle, so detection is a plain AABB
//! overlap test. Resolution is where the rules live: the shield soaks up one
//! meteor, an unshielded hit ends the run.

use super::rect::Rect;
use super::state::Meteor;

/// Outcome of testing all meteors against the ship for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// Meteor id destroyed by the shield, if any
    pub absorbed: Option<u32>,
    /// Meteor id that hit the ship, if any
    pub ship_hit: Option<u32>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::default()
    }
}

/// First meteor (in iteration order) overlapping `target`, skipping `exclude`
pub fn first_overlap(meteors: &[Meteor], target: &Rect, exclude: Option<u32>) -> Option<u32> {
    meteors
        .iter()
        .filter(|m| Some(m.id) != exclude)
        .find(|m| m.rect.intersects(target))
        .map(|m| m.id)
}

/// Resolve ship/shield vs meteor contacts
///
/// An active shield is tested first and absorbs at most one meteor. Any other
/// meteor touching the ship counts as a hit, shield or not, because the shield
/// is spent by then.
pub fn resolve_ship_collisions(
    meteors: &[Meteor],
    ship: &Rect,
    shield: Option<&Rect>,
) -> CollisionResult {
    let absorbed = shield.and_then(|rect| first_overlap(meteors, rect, None));
    let ship_hit = first_overlap(meteors, ship, absorbed);

    CollisionResult { absorbed, ship_hit }
}
