//! Data model for punto, a baccarat progression session tracker.
//!
//! Everything here is pure data: the fixed-point [`Decimal`] amounts, the
//! six-slot betting progression, and the serializable session state
//! ([`SessionSnapshot`]) that the tracker persists across restarts.

mod decimal;
mod pattern;
mod session;

pub use decimal::{Decimal, ParseDecimalError, SCALE};
pub use pattern::{PatternSlot, Position, BETTING_PATTERN, PATTERN_LEN};
pub use session::{
    ConfigError, HistoryEntry, Outcome, SessionAggregate, SessionConfig, SessionSnapshot,
    SnapshotError,
};
