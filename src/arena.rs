use bevy::math::Vec2;

use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH};

/// Euclidean distance between two arena positions.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Keep an entity of the given square footprint inside the arena rectangle.
/// Positions are top-left anchored, so the valid range per axis is
/// `[0, arena - footprint]`.
pub fn clamp_to_arena(p: Vec2, footprint: f32) -> Vec2 {
    Vec2::new(
        p.x.clamp(0.0, ARENA_WIDTH - footprint),
        p.y.clamp(0.0, ARENA_HEIGHT - footprint),
    )
}

/// Map a top-left arena position (y down) plus footprint to the Bevy world
/// coordinate of the entity's center (y up, origin at the arena center).
pub fn arena_to_world(p: Vec2, footprint: f32) -> Vec2 {
    Vec2::new(
        p.x + footprint / 2.0 - ARENA_WIDTH / 2.0,
        ARENA_HEIGHT / 2.0 - p.y - footprint / 2.0,
    )
}
