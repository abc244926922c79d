//! Frame draw list
//!
//! Draw order, back to front: stars, meteors, shield, ship, then the
//! game-over tint. Built after the frame's simulation steps have run.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState, MeteorKind, Rect};

/// Polygon segments per meteor
const METEOR_SEGMENTS: u32 = 9;
/// Shield outline thickness (pixels)
const SHIELD_OUTLINE: f32 = 2.0;

pub fn meteor_color(kind: MeteorKind) -> [f32; 4] {
    match kind {
        MeteorKind::Straight => colors::METEOR_STRAIGHT,
        MeteorKind::Zigzag => colors::METEOR_ZIGZAG,
        MeteorKind::Homing => colors::METEOR_HOMING,
    }
}

/// Build screen-space vertices for the whole frame
pub fn build_vertices(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        state.stars.len() * 6 + state.meteors.len() * METEOR_SEGMENTS as usize * 3 + 64,
    );

    for star in &state.stars {
        vertices.extend(shapes::rect(&star.rect(), colors::STAR));
    }

    for meteor in &state.meteors {
        vertices.extend(shapes::meteor(
            &meteor.rect,
            meteor_color(meteor.kind),
            meteor.id,
            METEOR_SEGMENTS,
        ));
    }

    if state.shield.active {
        vertices.extend(shapes::rect(&state.shield.rect, colors::SHIELD));
        let mut edge = colors::SHIELD;
        edge[3] = 0.9;
        vertices.extend(shapes::rect_outline(&state.shield.rect, SHIELD_OUTLINE, edge));
    }

    vertices.extend(shapes::ship(
        &state.ship.rect,
        colors::SHIP,
        colors::SHIP_COCKPIT,
    ));

    if state.phase == GamePhase::GameOver {
        let full = Rect::new(0.0, 0.0, state.arena.width, state.arena.height);
        vertices.extend(shapes::rect(&full, colors::GAME_OVER_OVERLAY));
    }

    vertices
}
