//! Session tracking for a fixed baccarat betting progression.
//!
//! The progression plays a six-slot Player/Banker pattern with a
//! martingale stake: a loss doubles the bet and follows the pattern's
//! loss link, a win returns to the base stake and the first slot, a tie
//! changes nothing. [`Session`] applies outcomes through the pure
//! [`engine`] functions and keeps an append-only history with a movable
//! cursor, so every hand can be undone and redone exactly. [`Tracker`]
//! wraps a session together with a [`store::StateStore`] so state
//! survives restarts.

pub mod engine;
mod error;
mod session;
pub mod store;
mod tracker;

pub use error::TrackerError;
pub use session::Session;
pub use store::{FileStore, MemoryStore, StateStore, DARK_MODE_KEY, STATE_KEY};
pub use tracker::Tracker;
