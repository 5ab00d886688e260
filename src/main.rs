use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::{Window, WindowPlugin};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod arena;
mod battle;
mod constants;
mod creature;
mod game;
mod hud;
mod movement;
mod rules;
mod world;

use battle::{challenge_input, countdown_system, reset_input, reveal_system, BattleTimers};
use constants::{ARENA_HEIGHT, ARENA_WIDTH, TICK_HZ};
use game::{Game, GameRng};
use movement::{simulation_tick, sync_creature_labels, sync_creatures, sync_player};

fn main() {
    let mut rng = StdRng::from_os_rng();
    let game = Game::new(&mut rng);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,bevy_render=warn".to_string(),
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Pineapple Knife Bum Adventure".to_string(),
                        resolution: (ARENA_WIDTH as u32, ARENA_HEIGHT as u32).into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::srgb(0.78, 0.90, 0.78)))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(game)
        .insert_resource(GameRng(rng))
        .init_resource::<BattleTimers>()
        .add_systems(Startup, world::setup)
        .add_systems(Startup, hud::setup_hud)
        .add_systems(FixedUpdate, simulation_tick)
        .add_systems(Update, challenge_input)
        .add_systems(Update, countdown_system)
        .add_systems(Update, reveal_system)
        .add_systems(Update, reset_input)
        .add_systems(Update, sync_player)
        .add_systems(Update, sync_creatures)
        .add_systems(Update, sync_creature_labels)
        .add_systems(Update, hud::update_header)
        .add_systems(Update, hud::spawn_battle_panel)
        .add_systems(Update, hud::despawn_battle_panel)
        .add_systems(Update, hud::handle_move_buttons)
        .add_systems(Update, hud::spawn_countdown_panel)
        .add_systems(Update, hud::update_countdown_text)
        .add_systems(Update, hud::despawn_countdown_panel)
        .add_systems(Update, hud::spawn_result_panel)
        .add_systems(Update, hud::update_result_panel)
        .add_systems(Update, hud::despawn_result_panel)
        .add_systems(Update, hud::update_roster)
        .add_systems(Update, hud::update_nearby_cue)
        .add_systems(Update, hud::handle_reset_button)
        .add_systems(Update, hud::update_button_visuals)
        .run();
}
