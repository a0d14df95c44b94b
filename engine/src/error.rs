use thiserror::Error;

/// Recoverable faults reported by the engine. None of these abort a session;
/// callers decide whether to retry, ignore, or surface them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) already holds a tile")]
    OccupiedCell { row: usize, col: usize },

    #[error("a turn is already in flight")]
    TurnInFlight,

    #[error("no turn is awaiting settlement")]
    NoTurnInFlight,

    #[error("no legal move remains; start a new game")]
    Frozen,

    #[error("nothing to undo")]
    NoHistory,
}

/// Faults from a persistence gateway. The controller logs these and keeps
/// running in memory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("encoding failed: {0}")]
    Codec(String),
}
