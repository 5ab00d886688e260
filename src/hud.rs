use bevy::input::mouse::MouseButton;
use bevy::prelude::*;

use crate::battle::BattleTimers;
use crate::constants::{CREATURE_SIZE, RECRUIT_THRESHOLD};
use crate::game::{Game, GameRng, Mode};
use crate::rules::{Move, Outcome, ALL_MOVES};

#[derive(Component)]
pub struct HeaderText;

#[derive(Component)]
pub struct ResetButton;

#[derive(Component)]
pub(crate) struct BattlePanelRoot;

#[derive(Component, Clone, Copy)]
pub struct MoveButton(pub Move);

#[derive(Component)]
pub(crate) struct CountdownRoot;

#[derive(Component)]
pub(crate) struct CountdownText;

#[derive(Component)]
pub(crate) struct ResultRoot;

#[derive(Component)]
pub(crate) struct VsText;

#[derive(Component)]
pub(crate) struct ResultText;

#[derive(Component)]
pub(crate) struct RosterRoot;

#[derive(Component)]
pub(crate) struct RosterText;

#[derive(Component)]
pub(crate) struct NearbyCue;

const PANEL_BG: Color = Color::srgba(1.0, 1.0, 1.0, 0.92);
const PANEL_BORDER: Color = Color::srgba(0.13, 0.42, 0.16, 1.0);
const BUTTON_BG: Color = Color::srgba(0.20, 0.60, 0.25, 0.95);
const BUTTON_BG_HOVER: Color = Color::srgba(0.24, 0.68, 0.30, 1.0);
const BUTTON_BG_PRESSED: Color = Color::srgba(0.16, 0.50, 0.21, 1.0);
const TEXT_DARK: Color = Color::srgb(0.10, 0.30, 0.12);

pub fn setup_hud(mut commands: Commands) {
    // Title bar across the top of the arena.
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                top: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|col| {
            col.spawn((
                Text::new("Pineapple Knife Bum Adventure"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(TEXT_DARK),
            ));
            col.spawn((
                Text::new(""),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(TEXT_DARK),
                HeaderText,
            ));
        });

    // Reset is always available, top-right corner.
    commands
        .spawn((
            Button::default(),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                right: Val::Px(8.0),
                padding: UiRect::all(Val::Px(8.0)),
                border: UiRect::all(Val::Px(1.5)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.75, 0.22, 0.18, 0.95)),
            BorderRadius::all(Val::Px(8.0)),
            BorderColor::all(Color::srgba(0.55, 0.12, 0.10, 1.0)),
            ResetButton,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new("Reset Game"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.98, 0.95, 0.94)),
            ));
        });
}

pub fn update_header(game: Res<Game>, mut query: Query<&mut Text, With<HeaderText>>) {
    for mut text in query.iter_mut() {
        text.0 = format!(
            "Party Size: {} | Rules: 🍍 beats 🔪, 🔪 beats 🍑, 🍑 beats 🍍",
            game.party.len()
        );
    }
}

pub fn spawn_battle_panel(
    mut commands: Commands,
    game: Res<Game>,
    existing: Query<Entity, With<BattlePanelRoot>>,
) {
    if game.mode != Mode::Battling || !existing.is_empty() {
        return;
    }
    // Session not populated yet renders nothing rather than a broken panel.
    let Some(glyph) = game
        .session
        .as_ref()
        .and_then(|s| game.creature(s.creature))
        .map(|c| c.glyph)
    else {
        return;
    };

    let root = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexEnd,
                align_items: AlignItems::Center,
                padding: UiRect::bottom(Val::Px(24.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            BattlePanelRoot,
        ))
        .id();

    commands.entity(root).with_children(|parent| {
        parent
            .spawn((
                Node {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(10.0),
                    padding: UiRect::all(Val::Px(18.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(PANEL_BG),
                BorderRadius::all(Val::Px(12.0)),
                BorderColor::all(PANEL_BORDER),
            ))
            .with_children(|col| {
                col.spawn((
                    Text::new(format!("Challenge {glyph}!")),
                    TextFont {
                        font_size: 26.0,
                        ..default()
                    },
                    TextColor(TEXT_DARK),
                ));
                col.spawn((
                    Text::new("Choose your move:"),
                    TextFont {
                        font_size: 17.0,
                        ..default()
                    },
                    TextColor(TEXT_DARK),
                ));
                col.spawn(Node {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(12.0),
                    ..default()
                })
                .with_children(|row| {
                    for mv in ALL_MOVES {
                        row.spawn((
                            Button::default(),
                            Node {
                                padding: UiRect::all(Val::Px(12.0)),
                                border: UiRect::all(Val::Px(1.5)),
                                ..default()
                            },
                            BackgroundColor(BUTTON_BG),
                            BorderRadius::all(Val::Px(10.0)),
                            BorderColor::all(PANEL_BORDER),
                            MoveButton(mv),
                        ))
                        .with_children(|btn| {
                            btn.spawn((
                                Text::new(format!("{} {}", mv.glyph(), mv.name())),
                                TextFont {
                                    font_size: 20.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(0.97, 0.99, 0.97)),
                            ));
                        });
                    }
                });
            });
    });
}

pub fn despawn_battle_panel(
    mut commands: Commands,
    game: Res<Game>,
    roots: Query<Entity, With<BattlePanelRoot>>,
    children: Query<&Children>,
) {
    if game.mode == Mode::Battling {
        return;
    }
    despawn_overlay(&mut commands, &roots, &children);
}

pub fn handle_move_buttons(
    mut game: ResMut<Game>,
    mut rng: ResMut<GameRng>,
    mut timers: ResMut<BattleTimers>,
    mut interactions: Query<(&Interaction, &MoveButton), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, button) in &mut interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if game.mode != Mode::Battling {
            continue;
        }
        game.choose_move(button.0, &mut rng.0);
        if let Some(session) = game.session_id() {
            timers.arm_countdown(session);
        }
    }
}

pub fn spawn_countdown_panel(
    mut commands: Commands,
    game: Res<Game>,
    existing: Query<Entity, With<CountdownRoot>>,
) {
    if game.mode != Mode::Countdown || !existing.is_empty() {
        return;
    }
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::Flex,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            CountdownRoot,
        ))
        .with_children(|center| {
            center.spawn((
                Text::new(""),
                TextFont {
                    font_size: 96.0,
                    ..default()
                },
                TextColor(TEXT_DARK),
                CountdownText,
            ));
        });
}

pub fn update_countdown_text(game: Res<Game>, mut query: Query<&mut Text, With<CountdownText>>) {
    for mut text in query.iter_mut() {
        text.0 = match game.session.as_ref() {
            Some(s) if s.countdown > 0 => s.countdown.to_string(),
            Some(_) => "GO!".to_string(),
            None => String::new(),
        };
    }
}

pub fn despawn_countdown_panel(
    mut commands: Commands,
    game: Res<Game>,
    roots: Query<Entity, With<CountdownRoot>>,
    children: Query<&Children>,
) {
    if game.mode == Mode::Countdown {
        return;
    }
    despawn_overlay(&mut commands, &roots, &children);
}

pub fn spawn_result_panel(
    mut commands: Commands,
    game: Res<Game>,
    existing: Query<Entity, With<ResultRoot>>,
) {
    if game.mode != Mode::Revealing || !existing.is_empty() {
        return;
    }
    let root = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            ResultRoot,
        ))
        .id();

    commands.entity(root).with_children(|parent| {
        parent
            .spawn((
                Node {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(10.0),
                    padding: UiRect::all(Val::Px(20.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(PANEL_BG),
                BorderRadius::all(Val::Px(12.0)),
                BorderColor::all(PANEL_BORDER),
            ))
            .with_children(|col| {
                col.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(TEXT_DARK),
                    VsText,
                ));
                col.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(TEXT_DARK),
                    ResultText,
                ));
            });
    });
}

pub fn update_result_panel(
    game: Res<Game>,
    mut vs_query: Query<&mut Text, (With<VsText>, Without<ResultText>)>,
    mut result_query: Query<&mut Text, (With<ResultText>, Without<VsText>)>,
) {
    // Both texts degrade to blank while the session fields are unset.
    let Some(session) = game.session.as_ref() else {
        return;
    };
    let glyph = game
        .creature(session.creature)
        .map(|c| c.glyph.to_string())
        .unwrap_or_default();

    for mut text in vs_query.iter_mut() {
        text.0 = match (session.player_move, session.creature_move) {
            (Some(pm), Some(cm)) => format!(
                "You {} {}   VS   {} {} {}",
                pm.glyph(),
                pm.name(),
                glyph,
                cm.glyph(),
                cm.name()
            ),
            _ => String::new(),
        };
    }

    for mut text in result_query.iter_mut() {
        text.0 = match session.result {
            Some(Outcome::Player) => {
                let wins = game.wins_against(session.creature);
                if wins >= RECRUIT_THRESHOLD {
                    format!("You Win!  🎉 {glyph} joins your party! 🎉")
                } else {
                    format!("You Win!  ({wins}/{RECRUIT_THRESHOLD} wins to recruit)")
                }
            }
            Some(Outcome::Creature) => "You Lose!".to_string(),
            Some(Outcome::Tie) => "It's a Tie!".to_string(),
            None => String::new(),
        };
    }
}

pub fn despawn_result_panel(
    mut commands: Commands,
    game: Res<Game>,
    roots: Query<Entity, With<ResultRoot>>,
    children: Query<&Children>,
) {
    if game.mode == Mode::Revealing {
        return;
    }
    despawn_overlay(&mut commands, &roots, &children);
}

/// Top-left roster of recruited glyphs, shown only once someone has joined.
pub fn update_roster(
    mut commands: Commands,
    game: Res<Game>,
    roots: Query<Entity, With<RosterRoot>>,
    children: Query<&Children>,
    mut texts: Query<&mut Text, With<RosterText>>,
) {
    if game.party.is_empty() {
        despawn_overlay(&mut commands, &roots, &children);
        return;
    }

    let line: String = game
        .party
        .iter()
        .filter_map(|&id| game.creature(id))
        .map(|c| c.glyph.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    if roots.is_empty() {
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(64.0),
                    left: Val::Px(8.0),
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    padding: UiRect::all(Val::Px(8.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
                BorderRadius::all(Val::Px(8.0)),
                RosterRoot,
            ))
            .with_children(|col| {
                col.spawn((
                    Text::new("Your Party:"),
                    TextFont {
                        font_size: 15.0,
                        ..default()
                    },
                    TextColor(TEXT_DARK),
                ));
                col.spawn((
                    Text::new(line.clone()),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(TEXT_DARK),
                    RosterText,
                ));
            });
        return;
    }

    for mut text in texts.iter_mut() {
        text.0 = line.clone();
    }
}

/// The bouncing "SPACE" tag above whichever creature is in challenge range.
pub fn update_nearby_cue(
    mut commands: Commands,
    game: Res<Game>,
    mut cue: Query<(Entity, &mut Node), With<NearbyCue>>,
    children: Query<&Children>,
) {
    let target = if game.mode == Mode::Exploring {
        game.nearby.and_then(|id| game.creature(id)).map(|c| c.pos)
    } else {
        None
    };

    let Some(pos) = target else {
        for (entity, _) in cue.iter() {
            despawn_subtree(&mut commands, entity, &children);
        }
        return;
    };

    let left = Val::Px(pos.x + CREATURE_SIZE / 2.0 - 26.0);
    let top = Val::Px(pos.y - 26.0);

    if let Some((_, mut node)) = cue.iter_mut().next() {
        node.left = left;
        node.top = top;
        return;
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left,
                top,
                padding: UiRect::all(Val::Px(3.0)),
                border: UiRect::all(Val::Px(1.5)),
                ..default()
            },
            BackgroundColor(Color::WHITE),
            BorderRadius::all(Val::Px(5.0)),
            BorderColor::all(Color::srgb(0.2, 0.4, 0.9)),
            NearbyCue,
        ))
        .with_children(|tag| {
            tag.spawn((
                Text::new("SPACE"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.1, 0.1, 0.3)),
            ));
        });
}

pub fn handle_reset_button(
    mut game: ResMut<Game>,
    mut rng: ResMut<GameRng>,
    mut timers: ResMut<BattleTimers>,
    mut mouse_input: ResMut<ButtonInput<MouseButton>>,
    mut interactions: Query<&Interaction, (Changed<Interaction>, With<ResetButton>)>,
) {
    for interaction in &mut interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        game.reset(&mut rng.0);
        timers.clear();
        mouse_input.reset_all();
    }
}

pub fn update_button_visuals(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<MoveButton>),
    >,
) {
    for (interaction, mut bg) in &mut buttons {
        bg.0 = match *interaction {
            Interaction::Pressed => BUTTON_BG_PRESSED,
            Interaction::Hovered => BUTTON_BG_HOVER,
            Interaction::None => BUTTON_BG,
        };
    }
}

fn despawn_overlay<T: Component>(
    commands: &mut Commands,
    roots: &Query<Entity, With<T>>,
    children: &Query<&Children>,
) {
    for entity in roots.iter() {
        despawn_subtree(commands, entity, children);
    }
}

fn despawn_subtree(commands: &mut Commands, entity: Entity, children: &Query<&Children>) {
    if let Ok(child_entities) = children.get(entity) {
        for child in child_entities.iter() {
            despawn_subtree(commands, child, children);
        }
    }
    commands.entity(entity).despawn();
}
