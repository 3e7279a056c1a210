// src/movegen.rs
//! Per-piece move generation. Everything here reads the board and never
//! mutates it; legality against self-check lives in `Board`.

use crate::board::Board;
use crate::piece::{Piece, Stride};
use crate::types::{PieceKind, Square};

/// Raw destinations for `piece`, castling included for kings.
pub fn possible_moves(piece: &Piece, board: &Board) -> Vec<Square> {
    let mut moves = reach(piece, board);
    if piece.kind() == PieceKind::King {
        moves.extend(castle_move(piece, board));
    }
    moves
}

/// Raw destinations without castling. Attack queries go through this so that
/// castling never recurses back into another king's castling check.
pub(crate) fn reach(piece: &Piece, board: &Board) -> Vec<Square> {
    match piece.stride() {
        Stride::Single => single_move(piece, board),
        Stride::Sliding => multi_move(piece, board),
        Stride::Pawn => pawn_move(piece, board),
    }
}

fn is_enemy(piece: &Piece, board: &Board, square: Square) -> bool {
    board.piece_at(square).is_some_and(|other| other.color() != piece.color())
}

/// One step per direction: empty or enemy-occupied squares are kept.
pub fn single_move(piece: &Piece, board: &Board) -> Vec<Square> {
    let from = piece.location();
    piece.move_directions()
        .iter()
        .map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|sq| board.is_pos_empty(*sq) || is_enemy(piece, board, *sq))
        .collect()
}

/// Slides along each direction until the edge or the first piece. An enemy
/// blocker is included as the last square of its ray, a friendly one is not.
pub fn multi_move(piece: &Piece, board: &Board) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(dr, dc) in piece.move_directions() {
        let mut current = piece.location();
        loop {
            current = current.offset(dr, dc);
            if !board.is_in_bounds(current) { break; }

            match board.piece_at(current) {
                None => moves.push(current),
                Some(blocker) => {
                    if blocker.color() != piece.color() { moves.push(current); }
                    break;
                }
            }
        }
    }
    moves
}

/// Pushes, double step from the start row, diagonal captures and en passant.
/// Promotion is applied when the move is committed, not here.
pub fn pawn_move(piece: &Piece, board: &Board) -> Vec<Square> {
    let mut moves = Vec::new();
    let from = piece.location();
    let forward = piece.color().forward();

    // Forward pushes
    let one_step = from.offset(forward, 0);
    let two_step = from.offset(forward * 2, 0);
    if board.is_pos_empty(one_step) {
        moves.push(one_step);
        if piece.is_at_start() && board.is_pos_empty(two_step) {
            moves.push(two_step);
        }
    }

    // Diagonal captures
    for &(dr, dc) in piece.move_directions() {
        let target = from.offset(dr * forward, dc);
        if is_enemy(piece, board, target) {
            moves.push(target);
        }
    }

    // En passant
    if from.row == piece.color().en_passant_row() {
        for dc in [-1, 1] {
            let beside = from.offset(0, dc);
            let target = from.offset(forward, dc);
            if board.is_pos_empty(target) && just_double_stepped(piece, board, beside) {
                moves.push(target);
            }
        }
    }

    moves
}

/// True when the last move in history is an enemy pawn's double step that
/// ended on `beside`. Only the most recent move matters, so the right lapses
/// as soon as anything else is played.
fn just_double_stepped(piece: &Piece, board: &Board, beside: Square) -> bool {
    let Some(last) = board.last_move() else { return false };
    let Some(victim) = board.piece_at(beside) else { return false };

    victim.kind() == PieceKind::Pawn
        && victim.color() != piece.color()
        && last.piece.kind() == PieceKind::Pawn
        && last.piece.color() == victim.color()
        && last.destination == beside
        && (last.origin.row - last.destination.row).abs() == 2
}

// --- Castling ---

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastleSide { KingSide, QueenSide }

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::QueenSide, CastleSide::KingSide];

    /// Column step from the king toward this side's rook.
    pub fn direction(&self) -> i8 {
        match self { CastleSide::KingSide => 1, CastleSide::QueenSide => -1 }
    }

    /// Column distance from the king's home square to this side's rook.
    pub fn rook_distance(&self) -> i8 {
        match self { CastleSide::KingSide => 3, CastleSide::QueenSide => -4 }
    }

    /// Which side a king hop of `col_delta` columns castles toward, if it is one.
    pub fn from_king_hop(col_delta: i8) -> Option<CastleSide> {
        match col_delta {
            2 => Some(CastleSide::KingSide),
            -2 => Some(CastleSide::QueenSide),
            _ => None,
        }
    }
}

/// Two-square king hops. Requires an unmoved king and rook, a clear path,
/// and no attack on the king's square, the square it crosses, or where it lands.
/// Attacks use capture geometry (`is_attacked_by`) rather than raw reach, so a
/// pawn guards the empty diagonal squares in front of it.
pub fn castle_move(king: &Piece, board: &Board) -> Vec<Square> {
    let mut moves = Vec::new();
    if king.kind() != PieceKind::King || king.move_count() != 0 { return moves; }

    let home = king.location();
    let enemy = king.color().opponent();

    for side in CastleSide::ALL {
        let rook = match board.piece_at(home.offset(0, side.rook_distance())) {
            Some(rook) if rook.kind() == PieceKind::Rook
                && rook.color() == king.color()
                && rook.move_count() == 0 => rook,
            _ => continue,
        };

        // Rook reaching the square beside the king means everything between is clear
        let beside = home.offset(0, side.direction());
        if !board.is_pos_empty(beside) || !Board::includes_move(&reach(rook, board), beside) {
            continue;
        }

        let landing = home.offset(0, side.direction() * 2);
        if [home, beside, landing].iter().any(|sq| board.is_attacked_by(enemy, *sq)) {
            continue;
        }

        moves.push(landing);
    }
    moves
}

/// Squares `piece` attacks: capture geometry only. Pawns attack both forward
/// diagonals whatever stands there and never attack by pushing.
pub(crate) fn attacked_squares(piece: &Piece, board: &Board) -> Vec<Square> {
    let from = piece.location();
    match piece.stride() {
        Stride::Pawn => {
            let forward = piece.color().forward();
            piece.move_directions()
                .iter()
                .map(|&(dr, dc)| from.offset(dr * forward, dc))
                .filter(|sq| sq.is_in_bounds())
                .collect()
        }
        Stride::Single => piece.move_directions()
            .iter()
            .map(|&(dr, dc)| from.offset(dr, dc))
            .filter(|sq| sq.is_in_bounds())
            .collect(),
        Stride::Sliding => {
            let mut squares = Vec::new();
            for &(dr, dc) in piece.move_directions() {
                let mut current = from.offset(dr, dc);
                while current.is_in_bounds() {
                    squares.push(current);
                    if board.piece_at(current).is_some() { break; }
                    current = current.offset(dr, dc);
                }
            }
            squares
        }
    }
}
