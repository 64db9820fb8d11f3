//! UI-facing facade: drives the session from discrete interaction events
//! and keeps the persistence collaborator in sync.

use crate::error::TrackerError;
use crate::session::Session;
use crate::store::{StateStore, DARK_MODE_KEY, STATE_KEY};
use punto_types::{HistoryEntry, Outcome, Position, SessionAggregate, SessionConfig};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Session tracker bound to a store.
///
/// Construction loads whatever the store holds: the dark-mode preference
/// (default on) and, if present and intact, the previous session. Every
/// mutation requests a snapshot save; the in-memory state stays
/// authoritative whatever the store does with it.
pub struct Tracker<S: StateStore> {
    store: S,
    session: Option<Session>,
    dark_mode: bool,
}

impl<S: StateStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        let dark_mode = store.load_flag(DARK_MODE_KEY).unwrap_or(true);
        let session = store
            .load_snapshot(STATE_KEY)
            .and_then(|snapshot| match Session::from_snapshot(snapshot) {
                Ok(session) => Some(session),
                Err(err) => {
                    warn!(%err, "stored snapshot is not a reachable state, starting fresh");
                    None
                }
            });
        if session.is_some() {
            info!("restored session from store");
        }
        Self {
            store,
            session,
            dark_mode,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Begin a new session. Fails if one is already active or the config is
    /// invalid; neither failure changes any state.
    pub fn initialize(&mut self, config: SessionConfig) -> Result<(), TrackerError> {
        if self.session.is_some() {
            return Err(TrackerError::AlreadyActive);
        }
        let session = Session::new(config)?;
        info!(starting_bet = %config.starting_bet, "session initialized");
        self.session = Some(session);
        self.save();
        Ok(())
    }

    /// Record the outcome of one hand.
    pub fn apply_outcome(&mut self, outcome: Outcome) -> Result<(), TrackerError> {
        let session = self.session.as_mut().ok_or(TrackerError::NotInitialized)?;
        session.apply_outcome(outcome, now_ms());
        self.save();
        Ok(())
    }

    /// Step one entry back. `Ok(false)` means there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool, TrackerError> {
        let session = self.session.as_mut().ok_or(TrackerError::NotInitialized)?;
        let undone = session.undo();
        if undone {
            self.save();
        }
        Ok(undone)
    }

    /// Step one entry forward. `Ok(false)` means there was nothing to redo.
    pub fn redo(&mut self) -> Result<bool, TrackerError> {
        let session = self.session.as_mut().ok_or(TrackerError::NotInitialized)?;
        let redone = session.redo();
        if redone {
            self.save();
        }
        Ok(redone)
    }

    /// Drop the session and its stored snapshot. The theme preference
    /// survives a reset. Safe to call when already uninitialized.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            info!("session reset");
        }
        self.store.clear(STATE_KEY);
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flip and persist the theme preference; returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.store.save_flag(DARK_MODE_KEY, self.dark_mode);
        self.dark_mode
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        self.session.as_ref().map(Session::config)
    }

    pub fn aggregate(&self) -> Option<&SessionAggregate> {
        self.session.as_ref().map(Session::aggregate)
    }

    /// Side the next stake goes on, while a session is active.
    pub fn current_position(&self) -> Option<Position> {
        self.session.as_ref().map(Session::current_position)
    }

    /// Applied history entries, oldest first; empty when uninitialized.
    pub fn visible_history(&self) -> &[HistoryEntry] {
        self.session
            .as_ref()
            .map(Session::visible_history)
            .unwrap_or_default()
    }

    pub fn can_undo(&self) -> bool {
        self.session.as_ref().is_some_and(Session::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.session.as_ref().is_some_and(Session::can_redo)
    }

    fn save(&mut self) {
        let Some(session) = &self.session else { return };
        let snapshot = session.snapshot();
        self.store.save_snapshot(STATE_KEY, &snapshot);
    }
}

/// Milliseconds since the epoch, for history display ordering.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use punto_types::Decimal;

    fn config() -> SessionConfig {
        SessionConfig::new(
            Decimal::from_int(1),
            Decimal::ONE,
            Decimal::from_raw(9500),
        )
    }

    fn active_tracker() -> Tracker<MemoryStore> {
        let mut tracker = Tracker::new(MemoryStore::new());
        tracker.initialize(config()).unwrap();
        tracker
    }

    #[test]
    fn test_starts_uninitialized_with_empty_store() {
        let tracker = Tracker::new(MemoryStore::new());
        assert!(!tracker.is_initialized());
        assert!(tracker.aggregate().is_none());
        assert!(tracker.visible_history().is_empty());
        assert!(!tracker.can_undo());
        assert!(!tracker.can_redo());
    }

    #[test]
    fn test_operations_require_initialization() {
        let mut tracker = Tracker::new(MemoryStore::new());
        assert_eq!(
            tracker.apply_outcome(Outcome::Win),
            Err(TrackerError::NotInitialized)
        );
        assert_eq!(tracker.undo(), Err(TrackerError::NotInitialized));
        assert_eq!(tracker.redo(), Err(TrackerError::NotInitialized));
    }

    #[test]
    fn test_initialize_rejects_bad_config_and_double_init() {
        let mut tracker = Tracker::new(MemoryStore::new());

        let mut bad = config();
        bad.banker_payout = Decimal::ZERO;
        assert!(matches!(
            tracker.initialize(bad),
            Err(TrackerError::InvalidConfig(_))
        ));
        assert!(!tracker.is_initialized());

        tracker.initialize(config()).unwrap();
        assert_eq!(
            tracker.initialize(config()),
            Err(TrackerError::AlreadyActive)
        );
    }

    #[test]
    fn test_every_mutation_saves_a_snapshot() {
        let mut tracker = active_tracker();
        assert!(tracker.store.blob(STATE_KEY).is_some());

        tracker.apply_outcome(Outcome::Lose).unwrap();
        let after_lose = tracker.store.blob(STATE_KEY).unwrap().to_string();

        tracker.undo().unwrap();
        let after_undo = tracker.store.blob(STATE_KEY).unwrap().to_string();
        assert_ne!(after_lose, after_undo);

        tracker.redo().unwrap();
        let after_redo = tracker.store.blob(STATE_KEY).unwrap().to_string();
        assert_eq!(after_lose, after_redo);
    }

    #[test]
    fn test_restart_restores_session() {
        let mut tracker = active_tracker();
        tracker.apply_outcome(Outcome::Lose).unwrap();
        tracker.apply_outcome(Outcome::Win).unwrap();
        tracker.undo().unwrap();
        let aggregate = *tracker.aggregate().unwrap();
        let Tracker { store, .. } = tracker;

        // Same store, fresh process
        let restored = Tracker::new(store);
        assert!(restored.is_initialized());
        assert_eq!(*restored.aggregate().unwrap(), aggregate);
        assert!(restored.can_undo());
        assert!(restored.can_redo());
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_uninitialized() {
        let mut tracker = active_tracker();
        tracker.apply_outcome(Outcome::Win).unwrap();
        let Tracker { mut store, .. } = tracker;

        // Sabotage the stored aggregate
        let mut snapshot: punto_types::SessionSnapshot =
            serde_json::from_str(store.blob(STATE_KEY).unwrap()).unwrap();
        snapshot.aggregate.wins = 9;
        store.save_snapshot(STATE_KEY, &snapshot);

        let restored = Tracker::new(store);
        assert!(!restored.is_initialized());
    }

    #[test]
    fn test_reset_then_initialize_matches_fresh_session() {
        let mut tracker = active_tracker();
        tracker.apply_outcome(Outcome::Lose).unwrap();
        tracker.apply_outcome(Outcome::Tie).unwrap();

        tracker.reset();
        assert!(!tracker.is_initialized());
        assert!(tracker.store.blob(STATE_KEY).is_none());

        tracker.initialize(config()).unwrap();
        let fresh = Session::new(config()).unwrap();
        assert_eq!(tracker.session().unwrap(), &fresh);
    }

    #[test]
    fn test_dark_mode_defaults_on_and_persists() {
        let mut tracker = Tracker::new(MemoryStore::new());
        assert!(tracker.dark_mode());

        assert!(!tracker.toggle_dark_mode());
        let Tracker { store, .. } = tracker;

        let reloaded = Tracker::new(store);
        assert!(!reloaded.dark_mode());
    }

    #[test]
    fn test_dark_mode_survives_reset() {
        let mut tracker = active_tracker();
        tracker.toggle_dark_mode();
        tracker.reset();
        let Tracker { store, .. } = tracker;

        let reloaded = Tracker::new(store);
        assert!(!reloaded.dark_mode());
        assert!(!reloaded.is_initialized());
    }

    #[test]
    fn test_current_position_follows_pattern() {
        let mut tracker = active_tracker();
        assert_eq!(tracker.current_position(), Some(Position::Player));
        tracker.apply_outcome(Outcome::Lose).unwrap();
        assert_eq!(tracker.current_position(), Some(Position::Banker));
        tracker.apply_outcome(Outcome::Win).unwrap();
        assert_eq!(tracker.current_position(), Some(Position::Player));
    }
}
