//! Betting-progression engine.
//!
//! Pure functions of (pattern slot, outcome); no state of their own. Both
//! `Session::apply_outcome` and `Session::redo` go through [`transition`],
//! so a replayed entry always reproduces the original computation.

use punto_types::{Decimal, Outcome, Position, SessionConfig, BETTING_PATTERN};

/// Slot the progression moves to after an outcome at `index`.
///
/// A win always restarts the progression, a tie stays put, a loss follows
/// the slot's `next_if_lost` link.
pub fn next_index(outcome: Outcome, index: usize) -> usize {
    match outcome {
        Outcome::Win => 0,
        Outcome::Lose => BETTING_PATTERN[index].next_if_lost,
        Outcome::Tie => index,
    }
}

/// Stake for the next hand: back to the base stake on a win, doubled on a
/// loss (no cap), unchanged on a tie.
pub fn next_bet(outcome: Outcome, bet: Decimal, starting_bet: Decimal) -> Decimal {
    match outcome {
        Outcome::Win => starting_bet,
        Outcome::Lose => bet.doubled(),
        Outcome::Tie => bet,
    }
}

/// Signed profit delta for an outcome with `bet` staked on `position`.
pub fn profit(
    outcome: Outcome,
    position: Position,
    bet: Decimal,
    config: &SessionConfig,
) -> Decimal {
    // Callers validate the config before a bet can reach the engine.
    debug_assert!(bet.is_positive(), "bet must be positive");
    match outcome {
        Outcome::Win => match position {
            Position::Player => bet.mul(config.player_payout),
            Position::Banker => bet.mul(config.banker_payout),
        },
        Outcome::Lose => -bet,
        Outcome::Tie => Decimal::ZERO,
    }
}

/// Full effect of one outcome played at (`index`, `bet`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub position: Position,
    pub profit: Decimal,
    pub next_bet: Decimal,
    pub next_index: usize,
}

/// Compute the transition for an outcome at the given pre-hand state.
pub fn transition(
    outcome: Outcome,
    index: usize,
    bet: Decimal,
    config: &SessionConfig,
) -> Transition {
    let position = BETTING_PATTERN[index].position;
    Transition {
        position,
        profit: profit(outcome, position, bet, config),
        next_bet: next_bet(outcome, bet, config.starting_bet),
        next_index: next_index(outcome, index),
    }
}
