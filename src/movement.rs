use bevy::input::keyboard::KeyCode;
use bevy::prelude::*;

use crate::arena::arena_to_world;
use crate::constants::{CREATURE_SIZE, PLAYER_SIZE};
use crate::game::{Game, HeldDirections, Mode};

#[derive(Component)]
pub struct PlayerSprite;

#[derive(Component)]
pub struct CreatureSprite(pub u32);

#[derive(Component)]
pub struct CreatureLabel(pub u32);

/// Fixed-rate simulation step. Samples the held direction keys (WASD and
/// arrows are interchangeable) and advances the world by one tick.
pub fn simulation_tick(mut game: ResMut<Game>, input: Res<ButtonInput<KeyCode>>) {
    // Every other mode suspends movement entirely.
    if game.mode != Mode::Exploring {
        return;
    }

    let held = HeldDirections {
        up: input.pressed(KeyCode::KeyW) || input.pressed(KeyCode::ArrowUp),
        down: input.pressed(KeyCode::KeyS) || input.pressed(KeyCode::ArrowDown),
        left: input.pressed(KeyCode::KeyA) || input.pressed(KeyCode::ArrowLeft),
        right: input.pressed(KeyCode::KeyD) || input.pressed(KeyCode::ArrowRight),
    };
    game.movement_tick(held);
}

pub fn sync_player(game: Res<Game>, mut query: Query<&mut Transform, With<PlayerSprite>>) {
    for mut transform in query.iter_mut() {
        let world = arena_to_world(game.player.pos, PLAYER_SIZE);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}

pub fn sync_creatures(
    game: Res<Game>,
    mut query: Query<(&CreatureSprite, &mut Transform, &mut Sprite)>,
) {
    for (tag, mut transform, mut sprite) in query.iter_mut() {
        let Some(creature) = game.creature(tag.0) else {
            warn!("sync_creatures: no creature with id {}", tag.0);
            continue;
        };
        let world = arena_to_world(creature.pos, CREATURE_SIZE);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        // Party members render washed out.
        sprite.color = if creature.in_party {
            creature.color().with_alpha(0.7)
        } else {
            creature.color()
        };
    }
}

/// Keeps each creature's glyph label current: the glyph changes on reset and
/// a positive win counter is shown as a badge next to it.
pub fn sync_creature_labels(game: Res<Game>, mut query: Query<(&CreatureLabel, &mut Text2d)>) {
    for (tag, mut text) in query.iter_mut() {
        let Some(creature) = game.creature(tag.0) else {
            continue;
        };
        let wins = game.wins_against(tag.0);
        text.0 = if wins > 0 {
            format!("{} {}", creature.glyph, wins)
        } else {
            creature.glyph.to_string()
        };
    }
}
