// src/history.rs
use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::SaveLoadError;
use crate::piece::Piece;
use crate::types::{PieceKind, Square};

// --- Move History ---

/// A committed move, holding everything needed to take it back.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// The mover as it stood before the move (origin square, old move count).
    pub piece: Piece,
    pub origin: Square,
    pub destination: Square,
    /// Captured piece at its own square, which differs from `destination` en passant.
    pub captured: Option<Piece>,
    /// Rook relocation `(from, to)` when the move castled.
    pub rook_move: Option<(Square, Square)>,
    pub promotion: Option<PieceKind>,
}

impl MoveRecord {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.rook_move.is_some()
    }

    /// Coordinate notation such as "e2e4", "e1g1" or "a7a8q".
    pub fn to_algebraic_string(&self) -> String {
        format!("{}{}{}",
            self.origin.to_algebraic(),
            self.destination.to_algebraic(),
            self.promotion.map_or(String::new(), |kind| kind.letter().to_string()))
    }
}

pub fn to_json(records: &[MoveRecord]) -> Result<String, SaveLoadError> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn from_json(json: &str) -> Result<Vec<MoveRecord>, SaveLoadError> {
    Ok(serde_json::from_str(json)?)
}

pub fn save_history(records: &[MoveRecord], path: &str) -> Result<(), SaveLoadError> {
    let json = to_json(records)?;
    fs::write(path, json).map_err(|e| SaveLoadError::io(path, e))
}

pub fn load_history(path: &str) -> Result<Vec<MoveRecord>, SaveLoadError> {
    let json = fs::read_to_string(path).map_err(|e| SaveLoadError::io(path, e))?;
    from_json(&json)
}
