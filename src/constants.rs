pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

pub const CREATURE_SIZE: f32 = 40.0;
pub const PLAYER_SIZE: f32 = 50.0;

pub const WANDER_SPEED: f32 = 1.0;
pub const PLAYER_SPEED: f32 = 3.0;

pub const INTERACTION_DISTANCE: f32 = 60.0;
pub const CREATURE_COUNT: u32 = 8;

pub const RECRUIT_THRESHOLD: u32 = 3;
pub const COUNTDOWN_START: u8 = 3;

pub const COUNTDOWN_PERIOD_SECS: f32 = 1.0;
pub const REVEAL_DELAY_SECS: f32 = 1.0;
pub const RETURN_DELAY_SECS: f32 = 2.0;

// Party members line up behind-and-left of the player, one follow slot each.
pub const FOLLOW_BASE_GAP: f32 = 80.0;
pub const FOLLOW_SLOT_GAP: f32 = 30.0;
pub const FOLLOW_SPEED_FACTOR: f32 = 0.8;
pub const FOLLOW_SNAP_DISTANCE: f32 = 5.0;

pub const TICK_HZ: f64 = 60.0;
