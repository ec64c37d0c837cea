use thiserror::Error;

use crate::components::Position;

/// Why a swap request was refused before touching the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveViolation {
    OutOfBounds,
    NotAdjacent,
}

#[derive(Debug, Error, PartialEq)]
pub enum CascadeError {
    /// Bad session parameters. Fatal at session start.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A malformed swap request. The board is left untouched.
    #[error("invalid move {from} -> {to}: {reason:?}")]
    InvalidMove {
        from: Position,
        to: Position,
        reason: MoveViolation,
    },

    /// An internal invariant broke. Carries a dump of the board for diagnosis.
    #[error("inconsistent board state: {detail}\n{dump}")]
    InconsistentBoardState { detail: String, dump: String },

    /// The session hit an inconsistent board earlier and refuses further work.
    #[error("session aborted after an inconsistent board state")]
    SessionAborted,
}

/// Failures of the high-score store. Never fatal to a session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed high score file: {0}")]
    Json(#[from] serde_json::Error),
}
