use bevy::math::Vec2;
use bevy::prelude::Color;
use rand::Rng;

use crate::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, CREATURE_SIZE, PLAYER_SIZE, WANDER_SPEED,
};

pub const CREATURE_GLYPHS: [char; 7] = ['🐱', '🐶', '🐸', '🦊', '🐰', '🐼', '🦔'];

pub const PLAYER_GLYPH: &str = "🧑‍🌾";

#[derive(Debug, Clone)]
pub struct Creature {
    pub id: u32,
    pub glyph: char,
    pub pos: Vec2,
    pub vel: Vec2,
    pub in_party: bool,
}

impl Creature {
    /// Roll a fresh wanderer: random glyph, random spawn point inside the
    /// arena, random drift velocity per axis.
    pub fn generate(id: u32, rng: &mut impl Rng) -> Self {
        let glyph = CREATURE_GLYPHS[rng.random_range(0..CREATURE_GLYPHS.len())];
        Creature {
            id,
            glyph,
            pos: Vec2::new(
                rng.random::<f32>() * (ARENA_WIDTH - CREATURE_SIZE),
                rng.random::<f32>() * (ARENA_HEIGHT - CREATURE_SIZE),
            ),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * WANDER_SPEED * 2.0,
                (rng.random::<f32>() - 0.5) * WANDER_SPEED * 2.0,
            ),
            in_party: false,
        }
    }

    /// Tint for the body sprite under the glyph label, one per glyph.
    pub fn color(&self) -> Color {
        match CREATURE_GLYPHS.iter().position(|&g| g == self.glyph) {
            Some(0) => Color::srgb(0.95, 0.75, 0.45),
            Some(1) => Color::srgb(0.80, 0.62, 0.40),
            Some(2) => Color::srgb(0.45, 0.80, 0.40),
            Some(3) => Color::srgb(0.95, 0.55, 0.25),
            Some(4) => Color::srgb(0.92, 0.92, 0.92),
            Some(5) => Color::srgb(0.30, 0.30, 0.32),
            Some(6) => Color::srgb(0.65, 0.55, 0.45),
            _ => Color::WHITE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerAvatar {
    pub pos: Vec2,
}

impl PlayerAvatar {
    pub fn centered() -> Self {
        PlayerAvatar {
            pos: Vec2::new(
                ARENA_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
                ARENA_HEIGHT / 2.0 - PLAYER_SIZE / 2.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_inside_arena() {
        let mut rng = StdRng::seed_from_u64(7);
        for id in 0..100 {
            let c = Creature::generate(id, &mut rng);
            assert_eq!(c.id, id);
            assert!(c.pos.x >= 0.0 && c.pos.x <= ARENA_WIDTH - CREATURE_SIZE);
            assert!(c.pos.y >= 0.0 && c.pos.y <= ARENA_HEIGHT - CREATURE_SIZE);
            assert!(c.vel.x.abs() <= WANDER_SPEED);
            assert!(c.vel.y.abs() <= WANDER_SPEED);
            assert!(!c.in_party);
            assert!(CREATURE_GLYPHS.contains(&c.glyph));
        }
    }

    #[test]
    fn test_player_spawns_centered() {
        let player = PlayerAvatar::centered();
        assert_eq!(player.pos, Vec2::new(375.0, 275.0));
    }
}
