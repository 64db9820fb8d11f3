//! Session state machine: aggregate, append-only history, undo/redo cursor.

use crate::engine;
use punto_types::{
    ConfigError, HistoryEntry, Outcome, Position, SessionAggregate, SessionConfig,
    SessionSnapshot, SnapshotError, BETTING_PATTERN,
};
use tracing::debug;

/// An active tracking session.
///
/// Outcomes are applied through the progression engine and appended to the
/// history; the cursor (`applied`) marks how many entries the aggregate
/// currently reflects. Entries past the cursor are a redo tail, retained
/// until a new outcome overwrites them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    config: SessionConfig,
    aggregate: SessionAggregate,
    history: Vec<HistoryEntry>,
    /// Entries `[0, applied)` are reflected in the aggregate.
    applied: usize,
}

impl Session {
    /// Start a session from a validated config.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            aggregate: SessionAggregate::fresh(&config),
            config,
            history: Vec::new(),
            applied: 0,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn aggregate(&self) -> &SessionAggregate {
        &self.aggregate
    }

    /// Side the next stake is placed on.
    pub fn current_position(&self) -> Position {
        BETTING_PATTERN[self.aggregate.current_pattern_index].position
    }

    /// Applied entries, oldest first. This is what a history panel renders;
    /// the redo tail is not visible.
    pub fn visible_history(&self) -> &[HistoryEntry] {
        &self.history[..self.applied]
    }

    /// Cursor into the full history; `-1` when nothing is applied.
    pub fn history_index(&self) -> i64 {
        self.applied as i64 - 1
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.history.len()
    }

    /// Record one hand: update the counters and totals, advance the
    /// progression, discard any redo tail and append the entry.
    ///
    /// The entry captures the pre-transition bet, slot and position so undo
    /// can restore the prior state exactly. `created_at` is milliseconds
    /// since the epoch, recorded for display only.
    pub fn apply_outcome(&mut self, outcome: Outcome, created_at: u64) {
        let index = self.aggregate.current_pattern_index;
        let bet = self.aggregate.current_bet;
        let t = engine::transition(outcome, index, bet, &self.config);

        self.bump_counter(outcome);
        self.aggregate.total_profit = self.aggregate.total_profit + t.profit;
        self.aggregate.current_bet = t.next_bet;
        self.aggregate.current_pattern_index = t.next_index;

        self.history.truncate(self.applied);
        self.history.push(HistoryEntry {
            outcome,
            bet,
            pattern_index: index,
            position: t.position,
            profit: t.profit,
            created_at,
        });
        self.applied = self.history.len();
        debug!(
            %outcome,
            bet = %bet,
            profit = %t.profit,
            total = %self.aggregate.total_profit,
            "outcome applied"
        );
    }

    /// Reverse the most recent applied entry: the exact algebraic inverse
    /// of `apply_outcome`. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.applied == 0 {
            return false;
        }
        let entry = self.history[self.applied - 1];
        self.drop_counter(entry.outcome);
        self.aggregate.total_profit = self.aggregate.total_profit - entry.profit;
        self.aggregate.current_bet = entry.bet;
        self.aggregate.current_pattern_index = entry.pattern_index;
        self.applied -= 1;
        debug!(outcome = %entry.outcome, total = %self.aggregate.total_profit, "outcome undone");
        true
    }

    /// Reapply the entry just past the cursor by re-running the same
    /// transition it was recorded with. Never re-enters the apply path, so
    /// the history tail is untouched. Returns `false` at the tail.
    pub fn redo(&mut self) -> bool {
        if self.applied == self.history.len() {
            return false;
        }
        let entry = self.history[self.applied];
        let t = engine::transition(entry.outcome, entry.pattern_index, entry.bet, &self.config);
        self.bump_counter(entry.outcome);
        self.aggregate.total_profit = self.aggregate.total_profit + t.profit;
        self.aggregate.current_bet = t.next_bet;
        self.aggregate.current_pattern_index = t.next_index;
        self.applied += 1;
        debug!(outcome = %entry.outcome, total = %self.aggregate.total_profit, "outcome redone");
        true
    }

    /// Full serializable state, including any redo tail.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config,
            aggregate: self.aggregate,
            history: self.history.clone(),
            history_index: self.history_index(),
        }
    }

    /// Rebuild a session from a stored snapshot, rejecting anything that
    /// does not describe a reachable state.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        Ok(Self {
            config: snapshot.config,
            aggregate: snapshot.aggregate,
            applied: (snapshot.history_index + 1) as usize,
            history: snapshot.history,
        })
    }

    fn bump_counter(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.aggregate.wins += 1,
            Outcome::Lose => self.aggregate.losses += 1,
            Outcome::Tie => self.aggregate.ties += 1,
        }
    }

    fn drop_counter(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.aggregate.wins -= 1,
            Outcome::Lose => self.aggregate.losses -= 1,
            Outcome::Tie => self.aggregate.ties -= 1,
        }
    }
}
