use std::collections::HashMap;

use bevy::log::{info, warn};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::Rng;

use crate::arena::{clamp_to_arena, distance};
use crate::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, COUNTDOWN_START, CREATURE_COUNT, CREATURE_SIZE,
    FOLLOW_BASE_GAP, FOLLOW_SLOT_GAP, FOLLOW_SNAP_DISTANCE, FOLLOW_SPEED_FACTOR,
    INTERACTION_DISTANCE, PLAYER_SIZE, PLAYER_SPEED, RECRUIT_THRESHOLD,
};
use crate::creature::{Creature, PlayerAvatar};
use crate::rules::{resolve, Move, Outcome, ALL_MOVES};

/// All game randomness (spawns, creature move picks) draws from this one
/// seedable source.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Exploring,
    Battling,
    Countdown,
    Revealing,
}

/// Direction keys sampled for one simulation tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Transient record of one challenge. Dropped whole when the battle ends or
/// the game resets; the `id` lets timer callbacks detect they are stale.
#[derive(Debug, Clone)]
pub struct BattleSession {
    pub id: u64,
    pub creature: u32,
    pub player_move: Option<Move>,
    pub creature_move: Option<Move>,
    pub countdown: u8,
    pub result: Option<Outcome>,
}

/// The one owner of all mutable game state. Systems never poke at the fields
/// of the entities directly; they call the operations below.
#[derive(Resource)]
pub struct Game {
    pub player: PlayerAvatar,
    pub creatures: Vec<Creature>,
    pub party: Vec<u32>,
    pub wins: HashMap<u32, u32>,
    pub mode: Mode,
    pub nearby: Option<u32>,
    pub session: Option<BattleSession>,
    next_session: u64,
}

impl Game {
    pub fn new(rng: &mut impl Rng) -> Self {
        Game {
            player: PlayerAvatar::centered(),
            creatures: spawn_batch(rng),
            party: Vec::new(),
            wins: HashMap::new(),
            mode: Mode::Exploring,
            nearby: None,
            session: None,
            next_session: 0,
        }
    }

    pub fn creature(&self, id: u32) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn wins_against(&self, id: u32) -> u32 {
        self.wins.get(&id).copied().unwrap_or(0)
    }

    pub fn session_id(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.id)
    }

    /// One simulation step: player, then creatures, then the nearby scan,
    /// in that order. Does nothing outside exploration.
    pub fn movement_tick(&mut self, held: HeldDirections) {
        if self.mode != Mode::Exploring {
            return;
        }

        // Opposite keys cancel; diagonals keep full per-axis speed.
        let mut delta = Vec2::ZERO;
        if held.up {
            delta.y -= PLAYER_SPEED;
        }
        if held.down {
            delta.y += PLAYER_SPEED;
        }
        if held.left {
            delta.x -= PLAYER_SPEED;
        }
        if held.right {
            delta.x += PLAYER_SPEED;
        }
        self.player.pos = clamp_to_arena(self.player.pos + delta, PLAYER_SIZE);

        let player_pos = self.player.pos;
        for i in 0..self.creatures.len() {
            if self.creatures[i].in_party {
                let slot = self
                    .party
                    .iter()
                    .position(|&id| id == self.creatures[i].id)
                    .unwrap_or(0);
                follow_step(&mut self.creatures[i], player_pos, slot);
            } else {
                wander_step(&mut self.creatures[i]);
            }
        }

        self.nearby = self
            .creatures
            .iter()
            .find(|c| !c.in_party && distance(player_pos, c.pos) < INTERACTION_DISTANCE)
            .map(|c| c.id);
    }

    /// Open a battle against the current nearby creature. Returns false when
    /// there is nothing to challenge or a battle is already underway.
    pub fn start_battle(&mut self) -> bool {
        if self.mode != Mode::Exploring {
            return false;
        }
        let Some(creature) = self.nearby else {
            return false;
        };
        let id = self.next_session;
        self.next_session += 1;
        self.session = Some(BattleSession {
            id,
            creature,
            player_move: None,
            creature_move: None,
            countdown: COUNTDOWN_START,
            result: None,
        });
        self.mode = Mode::Battling;
        info!("battle {} started against creature {}", id, creature);
        true
    }

    /// Record the player's pick, roll the creature's counter-move (uniform,
    /// no strategy), and kick off the countdown.
    pub fn choose_move(&mut self, mv: Move, rng: &mut impl Rng) {
        if self.mode != Mode::Battling {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            warn!("choose_move with no open session");
            return;
        };
        session.player_move = Some(mv);
        session.creature_move = Some(ALL_MOVES[rng.random_range(0..ALL_MOVES.len())]);
        session.countdown = COUNTDOWN_START;
        self.mode = Mode::Countdown;
    }

    /// One second of countdown elapsed. Returns the remaining count; hitting
    /// zero moves the battle to the reveal phase.
    pub fn countdown_tick(&mut self) -> Option<u8> {
        if self.mode != Mode::Countdown {
            return None;
        }
        let session = self.session.as_mut()?;
        session.countdown = session.countdown.saturating_sub(1);
        let remaining = session.countdown;
        if remaining == 0 {
            self.mode = Mode::Revealing;
        }
        Some(remaining)
    }

    /// Resolve the duel, credit a player win, and recruit the creature when
    /// its counter crosses the threshold. Idempotent: a second call during
    /// the same session returns the stored result without re-applying it.
    pub fn reveal(&mut self) -> Option<Outcome> {
        if self.mode != Mode::Revealing {
            return None;
        }
        let (player_move, creature_move, creature_id, prior) = {
            let s = self.session.as_ref()?;
            (s.player_move, s.creature_move, s.creature, s.result)
        };
        if prior.is_some() {
            return prior;
        }
        let outcome = resolve(player_move?, creature_move?);
        if let Some(session) = self.session.as_mut() {
            session.result = Some(outcome);
        }
        info!("battle against creature {} resolved: {:?}", creature_id, outcome);
        if outcome == Outcome::Player {
            let count = self.wins.entry(creature_id).or_insert(0);
            *count += 1;
            if *count == RECRUIT_THRESHOLD {
                self.join_party(creature_id);
            }
        }
        Some(outcome)
    }

    /// Drop the session and hand control back to the movement loop.
    pub fn finish_battle(&mut self) {
        if self.session.take().is_none() {
            return;
        }
        self.mode = Mode::Exploring;
    }

    /// Flip a creature over to the party. Joining is one-way and guarded
    /// against a double call.
    pub fn join_party(&mut self, id: u32) {
        if self.party.contains(&id) {
            return;
        }
        let Some(creature) = self.creatures.iter_mut().find(|c| c.id == id) else {
            warn!("join_party: unknown creature {}", id);
            return;
        };
        if creature.in_party {
            return;
        }
        creature.in_party = true;
        self.party.push(id);
        if self.nearby == Some(id) {
            self.nearby = None;
        }
        info!("creature {} joined the party (size {})", id, self.party.len());
    }

    /// Back to a fresh game. Authoritative: clears the session mid-battle,
    /// which also strands any timer still tagged with the old session id.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.creatures = spawn_batch(rng);
        self.party.clear();
        self.wins.clear();
        self.player = PlayerAvatar::centered();
        self.mode = Mode::Exploring;
        self.nearby = None;
        self.session = None;
        info!("game reset");
    }
}

fn spawn_batch(rng: &mut impl Rng) -> Vec<Creature> {
    (0..CREATURE_COUNT).map(|id| Creature::generate(id, rng)).collect()
}

/// Drift by the wander velocity, reflecting off arena walls.
fn wander_step(creature: &mut Creature) {
    let next = creature.pos + creature.vel;
    if next.x <= 0.0 || next.x >= ARENA_WIDTH - CREATURE_SIZE {
        creature.vel.x = -creature.vel.x;
    }
    if next.y <= 0.0 || next.y >= ARENA_HEIGHT - CREATURE_SIZE {
        creature.vel.y = -creature.vel.y;
    }
    creature.pos = clamp_to_arena(next, CREATURE_SIZE);
}

/// Trail the player at the slot's offset, holding still once close enough
/// so followers do not jitter in place.
fn follow_step(creature: &mut Creature, player_pos: Vec2, slot: usize) {
    let target = Vec2::new(
        player_pos.x - FOLLOW_BASE_GAP - FOLLOW_SLOT_GAP * slot as f32,
        player_pos.y,
    );
    let to_target = target - creature.pos;
    let dist = to_target.length();
    if dist > FOLLOW_SNAP_DISTANCE {
        creature.pos += to_target / dist * (PLAYER_SPEED * FOLLOW_SPEED_FACTOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    fn new_game() -> (Game, StdRng) {
        let mut rng = StdRng::seed_from_u64(42);
        let game = Game::new(&mut rng);
        (game, rng)
    }

    fn held(up: bool, down: bool, left: bool, right: bool) -> HeldDirections {
        HeldDirections { up, down, left, right }
    }

    #[test]
    fn test_fresh_game() {
        let (game, _) = new_game();
        assert_eq!(game.creatures.len(), CREATURE_COUNT as usize);
        assert!(game.party.is_empty());
        assert!(game.wins.is_empty());
        assert_eq!(game.mode, Mode::Exploring);
        assert!(game.session.is_none());
        assert_eq!(game.player.pos, Vec2::new(375.0, 275.0));
    }

    #[test]
    fn test_walk_right_until_wall() {
        let (mut game, _) = new_game();
        let mut last_x = game.player.pos.x;
        for _ in 0..200 {
            game.movement_tick(held(false, false, false, true));
            assert!(game.player.pos.x >= last_x);
            assert!(game.player.pos.x <= ARENA_WIDTH - PLAYER_SIZE);
            last_x = game.player.pos.x;
        }
        // 200 ticks at speed 3 is far past the wall.
        assert_relative_eq!(game.player.pos.x, ARENA_WIDTH - PLAYER_SIZE);
        game.movement_tick(held(false, false, false, true));
        assert_relative_eq!(game.player.pos.x, ARENA_WIDTH - PLAYER_SIZE);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let (mut game, _) = new_game();
        let before = game.player.pos;
        game.movement_tick(held(true, true, true, true));
        assert_eq!(game.player.pos, before);
    }

    #[test]
    fn test_diagonal_full_per_axis_speed() {
        let (mut game, _) = new_game();
        let before = game.player.pos;
        game.movement_tick(held(true, false, false, true));
        assert_relative_eq!(game.player.pos.x, before.x + PLAYER_SPEED);
        assert_relative_eq!(game.player.pos.y, before.y - PLAYER_SPEED);
    }

    #[test]
    fn test_no_movement_outside_exploring() {
        let (mut game, _) = new_game();
        game.mode = Mode::Battling;
        let player_before = game.player.pos;
        let creatures_before: Vec<Vec2> = game.creatures.iter().map(|c| c.pos).collect();
        game.movement_tick(held(false, false, false, true));
        assert_eq!(game.player.pos, player_before);
        for (c, before) in game.creatures.iter().zip(creatures_before) {
            assert_eq!(c.pos, before);
        }
    }

    #[test]
    fn test_wanderer_reflects_off_left_wall() {
        let (mut game, _) = new_game();
        // Park the player and all other creatures out of the way.
        game.player.pos = Vec2::new(700.0, 500.0);
        for c in &mut game.creatures {
            c.pos = Vec2::new(400.0, 400.0);
            c.vel = Vec2::ZERO;
        }
        game.creatures[0].pos = Vec2::new(0.5, 300.0);
        game.creatures[0].vel = Vec2::new(-1.0, 0.0);
        game.movement_tick(HeldDirections::default());
        assert_relative_eq!(game.creatures[0].pos.x, 0.0);
        assert_relative_eq!(game.creatures[0].vel.x, 1.0);
    }

    #[test]
    fn test_follower_closes_on_slot_and_snaps() {
        let (mut game, _) = new_game();
        game.player.pos = Vec2::new(400.0, 300.0);
        for c in &mut game.creatures {
            c.pos = Vec2::new(700.0, 100.0);
            c.vel = Vec2::ZERO;
        }
        game.join_party(0);
        // Slot 0 target is 80 left of the player, same y.
        let target = Vec2::new(320.0, 300.0);
        game.creatures[0].pos = Vec2::new(200.0, 300.0);
        game.movement_tick(HeldDirections::default());
        let step = PLAYER_SPEED * FOLLOW_SPEED_FACTOR;
        assert_relative_eq!(game.creatures[0].pos.x, 200.0 + step);
        // Inside the snap distance it holds position.
        game.creatures[0].pos = Vec2::new(target.x - 2.0, target.y);
        game.movement_tick(HeldDirections::default());
        assert_relative_eq!(game.creatures[0].pos.x, target.x - 2.0);
    }

    #[test]
    fn test_nearby_detection_skips_party() {
        let (mut game, _) = new_game();
        game.player.pos = Vec2::new(400.0, 300.0);
        for c in &mut game.creatures {
            c.pos = Vec2::new(700.0, 100.0);
            c.vel = Vec2::ZERO;
        }
        game.creatures[3].pos = Vec2::new(410.0, 310.0);
        game.movement_tick(HeldDirections::default());
        assert_eq!(game.nearby, Some(3));

        game.join_party(3);
        assert_eq!(game.nearby, None);
        game.movement_tick(HeldDirections::default());
        assert_ne!(game.nearby, Some(3));
    }

    #[test]
    fn test_challenge_opens_session() {
        let (mut game, _) = new_game();
        game.nearby = Some(5);
        assert!(game.start_battle());
        assert_eq!(game.mode, Mode::Battling);
        let session = game.session.as_ref().unwrap();
        assert_eq!(session.creature, 5);
        assert!(session.player_move.is_none());
        assert!(session.result.is_none());
    }

    #[test]
    fn test_challenge_requires_nearby_and_exploring() {
        let (mut game, _) = new_game();
        game.nearby = None;
        assert!(!game.start_battle());
        game.nearby = Some(1);
        game.mode = Mode::Countdown;
        assert!(!game.start_battle());
    }

    #[test]
    fn test_choose_move_starts_countdown() {
        let (mut game, mut rng) = new_game();
        game.nearby = Some(2);
        game.start_battle();
        game.choose_move(Move::Pineapple, &mut rng);
        assert_eq!(game.mode, Mode::Countdown);
        let session = game.session.as_ref().unwrap();
        assert_eq!(session.player_move, Some(Move::Pineapple));
        assert!(session.creature_move.is_some());
        assert_eq!(session.countdown, COUNTDOWN_START);
    }

    #[test]
    fn test_countdown_reaches_reveal() {
        let (mut game, mut rng) = new_game();
        game.nearby = Some(2);
        game.start_battle();
        game.choose_move(Move::Bum, &mut rng);
        assert_eq!(game.countdown_tick(), Some(2));
        assert_eq!(game.mode, Mode::Countdown);
        assert_eq!(game.countdown_tick(), Some(1));
        assert_eq!(game.countdown_tick(), Some(0));
        assert_eq!(game.mode, Mode::Revealing);
        // No further ticks once revealing.
        assert_eq!(game.countdown_tick(), None);
    }

    fn force_session(game: &mut Game, creature: u32, player: Move, opponent: Move) {
        game.session = Some(BattleSession {
            id: 99,
            creature,
            player_move: Some(player),
            creature_move: Some(opponent),
            countdown: 0,
            result: None,
        });
        game.mode = Mode::Revealing;
    }

    #[test]
    fn test_pineapple_beats_knife_counts_win() {
        let (mut game, _) = new_game();
        force_session(&mut game, 4, Move::Pineapple, Move::Knife);
        assert_eq!(game.reveal(), Some(Outcome::Player));
        assert_eq!(game.wins_against(4), 1);
        assert!(game.party.is_empty());
    }

    #[test]
    fn test_loss_and_tie_leave_counter_alone() {
        let (mut game, _) = new_game();
        force_session(&mut game, 4, Move::Knife, Move::Pineapple);
        assert_eq!(game.reveal(), Some(Outcome::Creature));
        assert_eq!(game.wins_against(4), 0);

        game.finish_battle();
        force_session(&mut game, 4, Move::Bum, Move::Bum);
        assert_eq!(game.reveal(), Some(Outcome::Tie));
        assert_eq!(game.wins_against(4), 0);
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let (mut game, _) = new_game();
        force_session(&mut game, 4, Move::Pineapple, Move::Knife);
        assert_eq!(game.reveal(), Some(Outcome::Player));
        assert_eq!(game.reveal(), Some(Outcome::Player));
        assert_eq!(game.wins_against(4), 1);
    }

    #[test]
    fn test_recruitment_exactly_at_threshold() {
        let (mut game, _) = new_game();
        game.wins.insert(6, 2);
        // Wins against other creatures must not tip creature 6 over.
        game.wins.insert(1, 2);
        force_session(&mut game, 1, Move::Knife, Move::Bum);
        game.reveal();
        game.finish_battle();
        assert!(!game.creature(6).unwrap().in_party);

        force_session(&mut game, 6, Move::Knife, Move::Bum);
        game.reveal();
        assert_eq!(game.wins_against(6), 3);
        assert!(game.creature(6).unwrap().in_party);
        assert_eq!(game.party, vec![1, 6]);
    }

    #[test]
    fn test_party_and_pool_mutually_exclusive() {
        let (mut game, _) = new_game();
        game.join_party(2);
        game.join_party(7);
        for c in &game.creatures {
            assert_eq!(c.in_party, game.party.contains(&c.id));
        }
    }

    #[test]
    fn test_double_join_is_noop() {
        let (mut game, _) = new_game();
        game.join_party(2);
        game.join_party(2);
        assert_eq!(game.party, vec![2]);
    }

    #[test]
    fn test_finish_battle_returns_to_exploring() {
        let (mut game, _) = new_game();
        force_session(&mut game, 4, Move::Pineapple, Move::Knife);
        game.reveal();
        game.finish_battle();
        assert_eq!(game.mode, Mode::Exploring);
        assert!(game.session.is_none());
    }

    #[test]
    fn test_reset_during_countdown_is_authoritative() {
        let (mut game, mut rng) = new_game();
        game.nearby = Some(0);
        game.start_battle();
        let old_session = game.session_id();
        game.choose_move(Move::Knife, &mut rng);
        assert_eq!(game.mode, Mode::Countdown);

        game.reset(&mut rng);
        assert_eq!(game.mode, Mode::Exploring);
        assert!(game.session.is_none());
        assert!(game.party.is_empty());
        assert!(game.wins.is_empty());
        assert_eq!(game.player.pos, Vec2::new(375.0, 275.0));
        assert_eq!(game.creatures.len(), CREATURE_COUNT as usize);

        // A countdown timer left over from before the reset finds no
        // matching session and changes nothing.
        assert_eq!(game.countdown_tick(), None);
        assert_eq!(game.mode, Mode::Exploring);

        // The next battle gets a fresh identity.
        game.nearby = Some(0);
        game.start_battle();
        assert_ne!(game.session_id(), old_session);
    }

    #[test]
    fn test_session_ids_monotonic() {
        let (mut game, _) = new_game();
        game.nearby = Some(0);
        game.start_battle();
        let first = game.session_id().unwrap();
        game.finish_battle();
        game.nearby = Some(1);
        game.start_battle();
        assert!(game.session_id().unwrap() > first);
    }
}
