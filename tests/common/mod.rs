#![allow(dead_code)]

use chess_rules::{Board, Color, Piece, PieceKind, Square};

pub fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

pub fn place(board: &mut Board, kind: PieceKind, color: Color, row: i8, col: i8) {
    board.set_location(Piece::new(kind, color, sq(row, col)), sq(row, col)).unwrap();
}

pub fn place_moved(board: &mut Board, kind: PieceKind, color: Color, row: i8, col: i8, moves: u32) {
    board.set_location(Piece::new(kind, color, sq(row, col)).with_move_count(moves), sq(row, col)).unwrap();
}

/// Marks destinations on an 8x8 grid, 1 = reachable.
pub fn move_grid(moves: &[Square]) -> [[u8; 8]; 8] {
    let mut grid = [[0u8; 8]; 8];
    for m in moves {
        grid[m.row as usize][m.col as usize] = 1;
    }
    grid
}

pub fn sorted(mut moves: Vec<Square>) -> Vec<Square> {
    moves.sort_by_key(|m| (m.row, m.col));
    moves
}

pub fn moves_from(board: &Board, row: i8, col: i8) -> Vec<Square> {
    let piece = board.at_location(sq(row, col)).unwrap().expect("piece on square");
    piece.possible_moves(board)
}
