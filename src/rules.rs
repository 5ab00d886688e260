//! The duel rules: Pineapple beats Knife, Knife beats Bum, Bum beats Pineapple.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Pineapple,
    Knife,
    Bum,
}

pub const ALL_MOVES: [Move; 3] = [Move::Pineapple, Move::Knife, Move::Bum];

impl Move {
    pub fn glyph(self) -> &'static str {
        match self {
            Move::Pineapple => "🍍",
            Move::Knife => "🔪",
            Move::Bum => "🍑",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Pineapple => "Pineapple",
            Move::Knife => "Knife",
            Move::Bum => "Bum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Tie,
    Player,
    Creature,
}

/// The full beats relation, spelled out pair by pair. The three winning
/// pairs form a cycle; everything else is the creature's win.
pub fn resolve(player: Move, creature: Move) -> Outcome {
    if player == creature {
        return Outcome::Tie;
    }
    match (player, creature) {
        (Move::Pineapple, Move::Knife) => Outcome::Player,
        (Move::Knife, Move::Bum) => Outcome::Player,
        (Move::Bum, Move::Pineapple) => Outcome::Player,
        _ => Outcome::Creature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_move_ties() {
        for mv in ALL_MOVES {
            assert_eq!(resolve(mv, mv), Outcome::Tie);
        }
    }

    #[test]
    fn test_winning_pairs() {
        assert_eq!(resolve(Move::Pineapple, Move::Knife), Outcome::Player);
        assert_eq!(resolve(Move::Knife, Move::Bum), Outcome::Player);
        assert_eq!(resolve(Move::Bum, Move::Pineapple), Outcome::Player);
    }

    #[test]
    fn test_losing_pairs() {
        assert_eq!(resolve(Move::Knife, Move::Pineapple), Outcome::Creature);
        assert_eq!(resolve(Move::Bum, Move::Knife), Outcome::Creature);
        assert_eq!(resolve(Move::Pineapple, Move::Bum), Outcome::Creature);
    }

    #[test]
    fn test_antisymmetric() {
        for a in ALL_MOVES {
            for b in ALL_MOVES {
                if a == b {
                    continue;
                }
                let forward = resolve(a, b);
                let backward = resolve(b, a);
                // Exactly one side wins each distinct pairing.
                assert_ne!(forward, Outcome::Tie);
                assert_ne!(backward, Outcome::Tie);
                assert_ne!(forward, backward);
            }
        }
    }
}
