use bevy::input::keyboard::KeyCode;
use bevy::prelude::*;

use crate::constants::{COUNTDOWN_PERIOD_SECS, RETURN_DELAY_SECS, REVEAL_DELAY_SECS};
use crate::game::{Game, GameRng, Mode};

/// Wall-clock timers driving the battle phases. Each set of timers is tagged
/// with the battle session id it was armed under; if the live session no
/// longer matches (a reset, or the battle already ended), the timers are
/// discarded without touching game state.
#[derive(Resource, Default)]
pub struct BattleTimers {
    session: Option<u64>,
    countdown: Option<Timer>,
    phase: Option<Timer>,
}

impl BattleTimers {
    pub fn arm_countdown(&mut self, session: u64) {
        self.session = Some(session);
        self.countdown = Some(Timer::from_seconds(
            COUNTDOWN_PERIOD_SECS,
            TimerMode::Repeating,
        ));
        self.phase = None;
    }

    pub fn clear(&mut self) {
        *self = BattleTimers::default();
    }
}

/// Edge-triggered challenge: the press transition of space or enter, while
/// exploring with a creature in range, opens the battle.
pub fn challenge_input(input: Res<ButtonInput<KeyCode>>, mut game: ResMut<Game>) {
    if game.mode != Mode::Exploring {
        return;
    }
    if !input.just_pressed(KeyCode::Space) && !input.just_pressed(KeyCode::Enter) {
        return;
    }
    game.start_battle();
}

pub fn countdown_system(
    time: Res<Time>,
    mut game: ResMut<Game>,
    mut timers: ResMut<BattleTimers>,
) {
    if game.mode != Mode::Countdown {
        return;
    }
    if timers.session != game.session_id() {
        timers.clear();
        return;
    }
    let Some(timer) = timers.countdown.as_mut() else {
        return;
    };
    timer.tick(time.delta());
    if !timer.just_finished() {
        return;
    }
    game.countdown_tick();
    if game.mode == Mode::Revealing {
        timers.countdown = None;
        timers.phase = Some(Timer::from_seconds(REVEAL_DELAY_SECS, TimerMode::Once));
    }
}

/// Runs the two delays of the reveal phase: first the pause before the
/// outcome is computed, then the pause before control returns to the arena.
pub fn reveal_system(time: Res<Time>, mut game: ResMut<Game>, mut timers: ResMut<BattleTimers>) {
    if game.mode != Mode::Revealing {
        return;
    }
    if timers.session != game.session_id() {
        timers.clear();
        return;
    }
    let Some(timer) = timers.phase.as_mut() else {
        return;
    };
    timer.tick(time.delta());
    if !timer.just_finished() {
        return;
    }
    let resolved = game.session.as_ref().and_then(|s| s.result).is_some();
    if resolved {
        game.finish_battle();
        timers.clear();
    } else {
        game.reveal();
        timers.phase = Some(Timer::from_seconds(RETURN_DELAY_SECS, TimerMode::Once));
    }
}

/// R restarts the game from any mode. The HUD button does the same thing.
pub fn reset_input(
    input: Res<ButtonInput<KeyCode>>,
    mut game: ResMut<Game>,
    mut rng: ResMut<GameRng>,
    mut timers: ResMut<BattleTimers>,
) {
    if !input.just_pressed(KeyCode::KeyR) {
        return;
    }
    game.reset(&mut rng.0);
    timers.clear();
}
