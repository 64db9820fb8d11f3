use punto_types::ConfigError;

/// Tracker operation failure.
///
/// Undo/redo at a history boundary are not errors; they report "nothing to
/// do" through a `false` return instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// Configuration rejected before a session could become active.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    /// Operation requires an active session.
    #[error("no active session")]
    NotInitialized,
    /// `initialize` called while a session is active; `reset` first.
    #[error("a session is already active")]
    AlreadyActive,
}
