mod common;

use chess_rules::movegen::{multi_move, single_move};
use chess_rules::{Board, Color, PieceKind, Square};
use common::{move_grid, moves_from, place, sorted, sq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// --- Bishop ---

#[test]
fn bishop_moves_diagonally_in_middle_of_empty_board() {
    let mut board = Board::new();
    place(&mut board, PieceKind::Bishop, Color::White, 4, 4);

    let moves = moves_from(&board, 4, 4);
    assert_eq!(moves.len(), 13);
    assert_eq!(move_grid(&moves), [
        [1, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 0, 0, 0, 0, 0, 1],
        [0, 0, 1, 0, 0, 0, 1, 0],
        [0, 0, 0, 1, 0, 1, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 1, 0, 1, 0, 0],
        [0, 0, 1, 0, 0, 0, 1, 0],
        [0, 1, 0, 0, 0, 0, 0, 1],
    ]);
}

#[test]
fn black_bishop_sees_the_same_diagonals() {
    let mut board = Board::new();
    place(&mut board, PieceKind::Bishop, Color::Black, 4, 4);
    let mut white = Board::new();
    place(&mut white, PieceKind::Bishop, Color::White, 4, 4);
    assert_eq!(sorted(moves_from(&board, 4, 4)), sorted(moves_from(&white, 4, 4)));
}

#[test]
fn bishop_in_corner_has_one_diagonal() {
    let mut board = Board::new();
    place(&mut board, PieceKind::Bishop, Color::White, 0, 7);

    let moves = moves_from(&board, 0, 7);
    assert_eq!(move_grid(&moves), [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 1, 0],
        [0, 0, 0, 0, 0, 1, 0, 0],
        [0, 0, 0, 0, 1, 0, 0, 0],
        [0, 0, 0, 1, 0, 0, 0, 0],
        [0, 0, 1, 0, 0, 0, 0, 0],
        [0, 1, 0, 0, 0, 0, 0, 0],
        [1, 0, 0, 0, 0, 0, 0, 0],
    ]);
}

#[test]
fn bishop_stops_before_own_pieces() {
    let mut board = Board::new();
    place(&mut board, PieceKind::Bishop, Color::White, 4, 4);
    place(&mut board, PieceKind::Pawn, Color::White, 2, 2);
    place(&mut board, PieceKind::Pawn, Color::White, 6, 2);
    place(&mut board, PieceKind::Pawn, Color::White, 7, 7);

    assert_eq!(move_grid(&moves_from(&board, 4, 4)), [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 1],
        [0, 0, 0, 0, 0, 0, 1, 0],
        [0, 0, 0, 1, 0, 1, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 1, 0, 1, 0, 0],
        [0, 0, 0, 0, 0, 0, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ]);
}

#[test]
fn bishop_captures_enemy_but_not_beyond() {
    let mut board = Board::new();
    place(&mut board, PieceKind::Bishop, Color::White, 4, 4);
    place(&mut board, PieceKind::Pawn, Color::Black, 2, 2);
    place(&mut board, PieceKind::Pawn, Color::Black, 6, 2);
    place(&mut board, PieceKind::Pawn, Color::Black, 7, 7);

    assert_eq!(move_grid(&moves_from(&board, 4, 4)), [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 1],
        [0, 0, 1, 0, 0, 0, 1, 0],
        [0, 0, 0, 1, 0, 1, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 1, 0, 1, 0, 0],
        [0, 0, 1, 0, 0, 0, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 1],
    ]);
}

// --- Rook and Queen ---

#[test]
fn rook_covers_rank_and_file() {
    let mut board = Board::new();
    place(&mut board, PieceKind::Rook, Color::Black, 3, 5);
    let moves = moves_from(&board, 3, 5);
    assert_eq!(moves.len(), 14);
    assert!(moves.iter().all(|m| m.row == 3 || m.col == 5));
}

#[test]
fn queen_is_rook_plus_bishop() {
    let mut board = Board::new();
    place(&mut board, PieceKind::Queen, Color::White, 4, 4);
    place(&mut board, PieceKind::Knight, Color::Black, 4, 6);
    place(&mut board, PieceKind::Knight, Color::White, 2, 2);

    let mut rook_board = board.clone();
    place(&mut rook_board, PieceKind::Rook, Color::White, 4, 4);
    let mut bishop_board = board.clone();
    place(&mut bishop_board, PieceKind::Bishop, Color::White, 4, 4);

    let mut expected = moves_from(&rook_board, 4, 4);
    expected.extend(moves_from(&bishop_board, 4, 4));
    assert_eq!(sorted(moves_from(&board, 4, 4)), sorted(expected));
}

#[test]
fn sliders_in_starting_position_are_boxed_in() {
    let board = Board::standard();
    for (row, col) in [(7, 0), (7, 2), (7, 3), (0, 7), (0, 5)] {
        assert!(moves_from(&board, row, col).is_empty(), "({row}, {col})");
    }
}

#[test]
fn sliding_never_passes_the_first_blocker() {
    let mut rng = StdRng::seed_from_u64(7);
    let kinds = [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen];

    for _ in 0..200 {
        let mut board = Board::new();
        let origin = sq(rng.random_range(0..8), rng.random_range(0..8));
        let kind = kinds[rng.random_range(0..kinds.len())];
        place(&mut board, kind, Color::White, origin.row, origin.col);
        for _ in 0..rng.random_range(0..12usize) {
            let at = sq(rng.random_range(0..8), rng.random_range(0..8));
            if at == origin { continue; }
            let color = if rng.random_bool(0.5) { Color::White } else { Color::Black };
            place(&mut board, PieceKind::Pawn, color, at.row, at.col);
        }

        let piece = *board.at_location(origin).unwrap().unwrap();
        let moves = multi_move(&piece, &board);

        for &(dr, dc) in piece.move_directions() {
            let mut expected = Vec::new();
            let mut current = origin.offset(dr, dc);
            while current.is_in_bounds() {
                match board.at_location(current).unwrap() {
                    None => expected.push(current),
                    Some(blocker) => {
                        if blocker.color() == Color::Black { expected.push(current); }
                        break;
                    }
                }
                current = current.offset(dr, dc);
            }
            let on_ray: Vec<Square> = moves.iter().copied()
                .filter(|m| is_on_ray(origin, *m, dr, dc))
                .collect();
            assert_eq!(on_ray, expected, "{kind:?} at {origin} along ({dr}, {dc})");
        }
    }
}

fn is_on_ray(origin: Square, target: Square, dr: i8, dc: i8) -> bool {
    (1..8).any(|k| origin.offset(dr * k, dc * k) == target)
}

// --- Knight and King ---

#[test]
fn knight_jumps_and_ignores_blockers() {
    let mut board = Board::standard();
    let moves = sorted(moves_from(&board, 7, 1)); // b1
    assert_eq!(moves, vec![sq(5, 0), sq(5, 2)]);

    // From e4 the two jumps onto white's own pawns drop out
    place(&mut board, PieceKind::Knight, Color::White, 4, 4);
    let moves = moves_from(&board, 4, 4);
    assert_eq!(moves.len(), 6);
    assert!(!moves.contains(&sq(6, 3)) && !moves.contains(&sq(6, 5)));
}

#[test]
fn knight_in_corner() {
    let mut board = Board::new();
    place(&mut board, PieceKind::Knight, Color::Black, 0, 0);
    assert_eq!(sorted(moves_from(&board, 0, 0)), vec![sq(1, 2), sq(2, 1)]);
}

#[test]
fn single_move_captures_but_skips_own_pieces() {
    let mut board = Board::new();
    place(&mut board, PieceKind::King, Color::White, 4, 4);
    place(&mut board, PieceKind::Pawn, Color::White, 3, 4);
    place(&mut board, PieceKind::Pawn, Color::Black, 5, 5);

    let king = *board.at_location(sq(4, 4)).unwrap().unwrap();
    let moves = single_move(&king, &board);
    assert_eq!(moves.len(), 7);
    assert!(moves.contains(&sq(5, 5)));
    assert!(!moves.contains(&sq(3, 4)));
}

#[test]
fn king_in_corner_has_three_steps() {
    let mut board = Board::new();
    place(&mut board, PieceKind::King, Color::Black, 0, 0);
    assert_eq!(sorted(moves_from(&board, 0, 0)), vec![sq(0, 1), sq(1, 0), sq(1, 1)]);
}
