use bevy::prelude::*;

use crate::arena::arena_to_world;
use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH, CREATURE_SIZE, PLAYER_SIZE};
use crate::creature::PLAYER_GLYPH;
use crate::game::Game;
use crate::movement::{CreatureLabel, CreatureSprite, PlayerSprite};

pub fn setup(mut commands: Commands, game: Res<Game>) {
    commands.spawn((
        Camera2d::default(),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Arena backdrop.
    commands.spawn((
        Sprite::from_color(
            Color::srgb(0.72, 0.87, 0.72),
            Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        ),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));

    let player_world = arena_to_world(game.player.pos, PLAYER_SIZE);
    commands
        .spawn((
            Sprite::from_color(Color::srgba(0.55, 0.78, 0.95, 0.9), Vec2::splat(PLAYER_SIZE)),
            Transform::from_xyz(player_world.x, player_world.y, 1.0),
            PlayerSprite,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(PLAYER_GLYPH),
                TextFont {
                    font_size: 30.0,
                    ..default()
                },
                TextColor(Color::BLACK),
                Transform::from_xyz(0.0, 0.0, 0.5),
            ));
        });

    // The creature batch keeps its ids across resets, so these entities are
    // spawned once and kept in sync by the movement module.
    for creature in &game.creatures {
        let world = arena_to_world(creature.pos, CREATURE_SIZE);
        commands
            .spawn((
                Sprite::from_color(creature.color(), Vec2::splat(CREATURE_SIZE)),
                Transform::from_xyz(world.x, world.y, 1.0),
                CreatureSprite(creature.id),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(creature.glyph.to_string()),
                    TextFont {
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(Color::BLACK),
                    Transform::from_xyz(0.0, 0.0, 0.5),
                    CreatureLabel(creature.id),
                ));
            });
    }
}
