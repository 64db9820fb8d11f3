use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the table the current stake is placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Player,
    Banker,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Player => write!(f, "Player"),
            Position::Banker => write!(f, "Banker"),
        }
    }
}

/// One slot in the fixed betting progression: the side to bet while on this
/// slot, and the slot a loss moves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternSlot {
    pub position: Position,
    pub next_if_lost: usize,
}

/// Number of slots in the progression.
pub const PATTERN_LEN: usize = 6;

/// Fixed six-slot betting progression.
///
/// A win returns to slot 0, a tie stays put, a loss advances along
/// `next_if_lost` (wrapping from the last slot back to 0).
pub const BETTING_PATTERN: [PatternSlot; PATTERN_LEN] = [
    PatternSlot { position: Position::Player, next_if_lost: 1 },
    PatternSlot { position: Position::Banker, next_if_lost: 2 },
    PatternSlot { position: Position::Player, next_if_lost: 3 },
    PatternSlot { position: Position::Player, next_if_lost: 4 },
    PatternSlot { position: Position::Banker, next_if_lost: 5 },
    PatternSlot { position: Position::Banker, next_if_lost: 0 },
];
