// src/piece.rs
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::Board;
use crate::error::MoveError;
use crate::movegen;
use crate::types::{image_prefix, Color, PieceKind, Square};

// --- Geometry Table ---

/// How a piece walks along its direction vectors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stride {
    /// One step per direction (King, Knight).
    Single,
    /// Repeat each direction until blocked (Bishop, Rook, Queen).
    Sliding,
    /// Forward pushes plus diagonal captures; directions are the capture
    /// diagonals relative to the pawn's forward row delta.
    Pawn,
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub stride: Stride,
    pub directions: Vec<(i8, i8)>,
}

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

lazy_static! {
    // Indexed by PieceKind::index()
    static ref GEOMETRY: [Geometry; 6] = compute_geometry();
}

fn compute_geometry() -> [Geometry; 6] {
    let queen_dirs: Vec<(i8, i8)> = DIAGONALS.iter().chain(ORTHOGONALS.iter()).copied().collect();
    [
        Geometry { stride: Stride::Pawn, directions: vec![(1, -1), (1, 1)] },
        Geometry { stride: Stride::Single, directions: KNIGHT_JUMPS.to_vec() },
        Geometry { stride: Stride::Sliding, directions: DIAGONALS.to_vec() },
        Geometry { stride: Stride::Sliding, directions: ORTHOGONALS.to_vec() },
        Geometry { stride: Stride::Sliding, directions: queen_dirs.clone() },
        Geometry { stride: Stride::Single, directions: queen_dirs },
    ]
}

pub fn geometry(kind: PieceKind) -> &'static Geometry {
    &GEOMETRY[kind.index()]
}

// --- Piece ---

/// A piece on the board. The board owns every piece and keeps `location`
/// in step with the grid cell holding it.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    location: Square,
    move_count: u32,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, location: Square) -> Self {
        Piece { kind, color, location, move_count: 0 }
    }

    /// Same piece with a preset move counter, for building mid-game positions.
    pub fn with_move_count(mut self, move_count: u32) -> Self {
        self.move_count = move_count;
        self
    }

    pub fn kind(&self) -> PieceKind { self.kind }
    pub fn color(&self) -> Color { self.color }
    pub fn location(&self) -> Square { self.location }
    pub fn move_count(&self) -> u32 { self.move_count }

    pub(crate) fn set_location(&mut self, square: Square) {
        self.location = square;
    }

    pub(crate) fn count_move(&mut self) {
        self.move_count += 1;
    }

    pub(crate) fn uncount_move(&mut self) {
        self.move_count = self.move_count.saturating_sub(1);
    }

    pub fn stride(&self) -> Stride {
        geometry(self.kind).stride
    }

    pub fn move_directions(&self) -> &'static [(i8, i8)] {
        &geometry(self.kind).directions
    }

    /// Raw destinations (not filtered for self-check), including castling for kings.
    pub fn possible_moves(&self, board: &Board) -> Vec<Square> {
        movegen::possible_moves(self, board)
    }

    pub fn is_at_start(&self) -> bool {
        self.kind == PieceKind::Pawn && self.location.row == self.color.pawn_start_row()
    }

    pub fn is_at_end(&self) -> bool {
        self.kind == PieceKind::Pawn && self.location.row == self.color.promotion_row()
    }

    /// The piece this pawn becomes: same square, color and move count.
    pub fn promote(&self, choice: PieceKind) -> Result<Piece, MoveError> {
        if self.kind != PieceKind::Pawn || !choice.is_promotion_target() {
            return Err(MoveError::InvalidPromotion(choice));
        }
        Ok(self.promoted_to(choice))
    }

    pub(crate) fn promoted_to(&self, kind: PieceKind) -> Piece {
        Piece { kind, ..*self }
    }

    pub fn symbol(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }

    /// Image file name a renderer can use, e.g. "wp.svg" or "bk.svg".
    pub fn image_name(&self) -> String {
        format!("{}.svg", image_prefix(self.color, self.kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.letter();
        let symbol = match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        };
        write!(f, "{}", symbol)
    }
}
