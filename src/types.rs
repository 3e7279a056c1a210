// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Enums and Basic Structs ---

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color { White, Black }

impl Color {
    pub fn opponent(&self) -> Color {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }

    /// Row delta of one step forward. Black sits at the top (row 0) and moves down.
    pub fn forward(&self) -> i8 {
        match self { Color::White => -1, Color::Black => 1 }
    }

    /// Row holding this color's back rank (king and rooks at setup).
    pub fn home_row(&self) -> i8 {
        match self { Color::White => 7, Color::Black => 0 }
    }

    pub fn pawn_start_row(&self) -> i8 {
        match self { Color::White => 6, Color::Black => 1 }
    }

    /// Terminal rank: a pawn of this color arriving here is promoted.
    pub fn promotion_row(&self) -> i8 {
        match self { Color::White => 0, Color::Black => 7 }
    }

    /// Row a pawn of this color must stand on to capture en passant,
    /// i.e. the row an enemy pawn lands on after its double step.
    pub fn en_passant_row(&self) -> i8 {
        match self { Color::White => 3, Color::Black => 4 }
    }

    fn letter(&self) -> char {
        match self { Color::White => 'w', Color::Black => 'b' }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind { Pawn, Knight, Bishop, Rook, Queen, King }

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn, PieceKind::Knight, PieceKind::Bishop,
        PieceKind::Rook, PieceKind::Queen, PieceKind::King,
    ];

    pub fn index(&self) -> usize {
        match self {
            PieceKind::Pawn => 0, PieceKind::Knight => 1, PieceKind::Bishop => 2,
            PieceKind::Rook => 3, PieceKind::Queen => 4, PieceKind::King => 5,
        }
    }

    /// Lowercase letter used in move text and image names.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Pawn => 'p', PieceKind::Knight => 'n', PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r', PieceKind::Queen => 'q', PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn), 'n' => Some(PieceKind::Knight), 'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook), 'q' => Some(PieceKind::Queen), 'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Kinds a pawn may turn into.
    pub fn is_promotion_target(&self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

pub(crate) fn image_prefix(color: Color, kind: PieceKind) -> String {
    format!("{}{}", color.letter(), kind.letter())
}

// --- Squares ---

/// A (row, column) coordinate. Row 0 is the top edge (black's back rank),
/// column 0 is the a-file. Coordinates outside 0..8 are representable so that
/// stepping off the board can be detected with `is_in_bounds`.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self { Square { row, col } }

    pub fn is_in_bounds(&self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    /// Square reached by stepping `(dr, dc)` from here. The result may be off the board.
    pub fn offset(&self, dr: i8, dc: i8) -> Square {
        Square::new(self.row.saturating_add(dr), self.col.saturating_add(dc))
    }

    /// Parses "e2"-style notation. Rank 1 is row 7, rank 8 is row 0.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() { return None; }
        let col = match file_char { 'a'..='h' => file_char as u8 - b'a', _ => return None };
        let rank = match rank_char { '1'..='8' => rank_char as u8 - b'1', _ => return None };
        Some(Square::new(7 - rank as i8, col as i8))
    }

    pub fn to_algebraic(&self) -> String {
        if !self.is_in_bounds() { return "??".to_string(); }
        let file_char = (b'a' + self.col as u8) as char;
        let rank_char = (b'1' + (7 - self.row) as u8) as char;
        format!("{}{}", file_char, rank_char)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_in_bounds() {
            write!(f, "{}", self.to_algebraic())
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}
