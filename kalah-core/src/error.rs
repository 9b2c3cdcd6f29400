//! Error types
//!
//! Every variant here is recoverable: the engine hands it back to the caller
//! and leaves the state untouched. Broken stone conservation is not an error
//! value, it trips a debug assertion.

use crate::board::Player;
use thiserror::Error;

/// Why a move was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("the game is already over")]
    GameAlreadyOver,

    #[error("pit {pit} is not one of {mover:?}'s sowing pits")]
    NotOwnedByMover { pit: usize, mover: Player },

    #[error("pit {pit} is empty")]
    EmptyPit { pit: usize },

    #[error("move provider reported no legal move")]
    CollaboratorNoLegalMove,
}

/// Review request that cannot be served
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history index {index} is unavailable ({reason})")]
    InvalidHistoryIndex { index: usize, reason: &'static str },
}

/// Refusals raised by the game session driver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("move rejected: {0}")]
    Rejected(#[from] MoveRejection),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("waiting for the AI to move")]
    AwaitingAi,

    #[error("it is not the AI's turn")]
    NotAiTurn,
}
