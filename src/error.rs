// src/error.rs
use std::io;
use thiserror::Error;

use crate::types::{PieceKind, Square};

// --- Custom Error Types ---

/// Reasons a requested move is refused. None of these are exceptional: a UI
/// sends bad moves all the time and the board is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("square {0} is off the board")]
    OutOfBounds(Square),
    #[error("no piece found at {0}")]
    NoPieceAtOrigin(Square),
    #[error("illegal move {from} -> {to}: not a reachable destination")]
    IllegalMove { from: Square, to: Square },
    #[error("illegal move {from} -> {to}: leaves king in check")]
    LeavesKingInCheck { from: Square, to: Square },
    #[error("invalid promotion: cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}

#[derive(Debug, Error)]
pub enum SaveLoadError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error with file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl SaveLoadError {
    pub(crate) fn io(path: &str, source: io::Error) -> Self {
        SaveLoadError::Io { path: path.to_string(), source }
    }
}
