use crate::decimal::Decimal;
use crate::pattern::{Position, BETTING_PATTERN, PATTERN_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one hand, relative to the position the stake was on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Lose => write!(f, "lose"),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// Rejected session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("starting bet must be positive")]
    NonPositiveStartingBet,
    #[error("player payout ratio must be positive")]
    NonPositivePlayerPayout,
    #[error("banker payout ratio must be positive")]
    NonPositiveBankerPayout,
}

/// Immutable per-session betting parameters.
///
/// `player_payout` and `banker_payout` are the payout per unit staked when
/// the bet side wins; the banker ratio is conventionally 0.95 to model the
/// 5% commission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub starting_bet: Decimal,
    pub player_payout: Decimal,
    pub banker_payout: Decimal,
}

impl SessionConfig {
    pub fn new(starting_bet: Decimal, player_payout: Decimal, banker_payout: Decimal) -> Self {
        Self {
            starting_bet,
            player_payout,
            banker_payout,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.starting_bet.is_positive() {
            return Err(ConfigError::NonPositiveStartingBet);
        }
        if !self.player_payout.is_positive() {
            return Err(ConfigError::NonPositivePlayerPayout);
        }
        if !self.banker_payout.is_positive() {
            return Err(ConfigError::NonPositiveBankerPayout);
        }
        Ok(())
    }
}

/// Running totals for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAggregate {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub total_profit: Decimal,
    pub current_bet: Decimal,
    pub current_pattern_index: usize,
}

impl SessionAggregate {
    /// Aggregate immediately after `initialize`: no hands, base stake,
    /// first slot.
    pub fn fresh(config: &SessionConfig) -> Self {
        Self {
            wins: 0,
            losses: 0,
            ties: 0,
            total_profit: Decimal::ZERO,
            current_bet: config.starting_bet,
            current_pattern_index: 0,
        }
    }

    pub fn total_hands(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Win rate over decided hands (ties excluded), rounded to the nearest
    /// whole percent. 0 when no hand has been decided yet.
    pub fn win_rate_percent(&self) -> u32 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            return 0;
        }
        (self.wins * 200 + decided) / (decided * 2)
    }
}

/// One applied outcome, immutable once recorded.
///
/// `bet` and `pattern_index` capture the state the hand was played at
/// (pre-transition), which is exactly what undo restores. `created_at` is
/// milliseconds since the epoch, for display ordering only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub outcome: Outcome,
    pub bet: Decimal,
    pub pattern_index: usize,
    pub position: Position,
    pub profit: Decimal,
    pub created_at: u64,
}

/// Snapshot validation failure. Any of these means the stored blob does not
/// describe a reachable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("pattern index out of range")]
    PatternIndexOutOfRange,
    #[error("history cursor out of range")]
    CursorOutOfRange,
    #[error("non-positive bet amount")]
    NonPositiveBet,
    #[error("aggregate does not match applied history: {0}")]
    Inconsistent(&'static str),
}

/// Full serializable state of a session: config, aggregate, ordered history
/// and the undo/redo cursor (`-1` = nothing applied).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub config: SessionConfig,
    pub aggregate: SessionAggregate,
    pub history: Vec<HistoryEntry>,
    pub history_index: i64,
}

impl SessionSnapshot {
    /// Check that the snapshot describes a reachable state before trusting
    /// it. The persistence medium offers no integrity guarantees, so a blob
    /// that fails here is treated as "no prior session".
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.config.validate()?;
        if self.aggregate.current_pattern_index >= PATTERN_LEN {
            return Err(SnapshotError::PatternIndexOutOfRange);
        }
        if !self.aggregate.current_bet.is_positive() {
            return Err(SnapshotError::NonPositiveBet);
        }
        if self.history_index < -1 || self.history_index >= self.history.len() as i64 {
            return Err(SnapshotError::CursorOutOfRange);
        }

        let mut wins = 0u32;
        let mut losses = 0u32;
        let mut ties = 0u32;
        let mut profit = Decimal::ZERO;
        for (i, entry) in self.history.iter().enumerate() {
            if entry.pattern_index >= PATTERN_LEN {
                return Err(SnapshotError::PatternIndexOutOfRange);
            }
            if entry.position != BETTING_PATTERN[entry.pattern_index].position {
                return Err(SnapshotError::Inconsistent("entry position"));
            }
            if !entry.bet.is_positive() {
                return Err(SnapshotError::NonPositiveBet);
            }
            // Only entries at or before the cursor contribute to the totals
            if i as i64 <= self.history_index {
                match entry.outcome {
                    Outcome::Win => wins += 1,
                    Outcome::Lose => losses += 1,
                    Outcome::Tie => ties += 1,
                }
                profit = profit + entry.profit;
            }
        }
        if wins != self.aggregate.wins || losses != self.aggregate.losses || ties != self.aggregate.ties
        {
            return Err(SnapshotError::Inconsistent("outcome counters"));
        }
        if profit != self.aggregate.total_profit {
            return Err(SnapshotError::Inconsistent("total profit"));
        }
        Ok(())
    }
}
