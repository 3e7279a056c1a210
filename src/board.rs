// src/board.rs
use log::{debug, info, trace};
use std::fmt;

use crate::config::Config;
use crate::error::{MoveError, SaveLoadError};
use crate::history::{self, MoveRecord};
use crate::movegen::{self, CastleSide};
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen,
    PieceKind::King, PieceKind::Bishop, PieceKind::Knight, PieceKind::Rook,
];

// --- Promotion Hook ---

/// Lets the caller pick what a pawn turns into. Returning `None` falls back
/// to the board's default promotion (Queen unless configured otherwise).
pub trait PromotionHook {
    fn promotion_choice(&mut self, pawn: &Piece, destination: Square) -> Option<PieceKind>;
}

impl PromotionHook for Option<PieceKind> {
    fn promotion_choice(&mut self, _pawn: &Piece, _destination: Square) -> Option<PieceKind> {
        *self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus { Ongoing, Check, Checkmate, Stalemate }

// --- Move Planning ---

/// Every square a move touches, worked out before anything is mutated.
#[derive(Debug, Copy, Clone)]
struct MovePlan {
    origin: Square,
    destination: Square,
    /// Square of the captured piece; beside the pawn for en passant.
    capture_square: Option<Square>,
    rook_move: Option<(Square, Square)>,
}

// --- Board ---

/// 8x8 grid owning every piece on it, plus the log of committed moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    history: Vec<MoveRecord>,
    default_promotion: PieceKind,
}

impl Default for Board {
    fn default() -> Self { Board::new() }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Board { grid: [[None; 8]; 8], history: Vec::new(), default_promotion: PieceKind::Queen }
    }

    /// The standard starting position: black on rows 0-1, white on rows 6-7.
    pub fn standard() -> Self {
        let mut board = Board::new();
        for color in [Color::White, Color::Black] {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                let col = col as i8;
                board.put(Piece::new(kind, color, Square::new(color.home_row(), col)));
                board.put(Piece::new(PieceKind::Pawn, color, Square::new(color.pawn_start_row(), col)));
            }
        }
        board
    }

    pub fn with_config(config: &Config) -> Result<Self, MoveError> {
        let mut board = Board::standard();
        board.set_default_promotion(config.default_promotion)?;
        Ok(board)
    }

    pub fn default_promotion(&self) -> PieceKind { self.default_promotion }

    pub fn set_default_promotion(&mut self, kind: PieceKind) -> Result<(), MoveError> {
        if !kind.is_promotion_target() {
            return Err(MoveError::InvalidPromotion(kind));
        }
        self.default_promotion = kind;
        Ok(())
    }

    // Callers guarantee `sq` is on the board.
    fn cell(&self, sq: Square) -> &Option<Piece> {
        &self.grid[sq.row as usize][sq.col as usize]
    }

    fn cell_mut(&mut self, sq: Square) -> &mut Option<Piece> {
        &mut self.grid[sq.row as usize][sq.col as usize]
    }

    fn put(&mut self, piece: Piece) {
        *self.cell_mut(piece.location()) = Some(piece);
    }

    fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cell_mut(sq).take()
    }

    /// Lenient lookup for move generation: off-board squares read as empty.
    pub(crate) fn piece_at(&self, sq: Square) -> Option<&Piece> {
        if !sq.is_in_bounds() { return None; }
        self.cell(sq).as_ref()
    }

    // --- Queries ---

    pub fn is_in_bounds(&self, sq: Square) -> bool {
        sq.is_in_bounds()
    }

    pub fn at_location(&self, sq: Square) -> Result<Option<&Piece>, MoveError> {
        if !sq.is_in_bounds() { return Err(MoveError::OutOfBounds(sq)); }
        Ok(self.cell(sq).as_ref())
    }

    /// True only for on-board squares with nothing on them.
    pub fn is_pos_empty(&self, sq: Square) -> bool {
        sq.is_in_bounds() && self.cell(sq).is_none()
    }

    /// All pieces, optionally only those of `color`, in row-major order.
    pub fn get_pieces(&self, color: Option<Color>) -> Vec<&Piece> {
        self.grid.iter()
            .flatten()
            .flatten()
            .filter(|piece| color.map_or(true, |c| piece.color() == c))
            .collect()
    }

    pub fn includes_move(moves: &[Square], square: Square) -> bool {
        moves.contains(&square)
    }

    /// Whether any piece of `color` has `square` among its raw destinations.
    /// Castling is left out so this never recurses into another castling check.
    pub fn color_can_move_there(&self, color: Color, square: Square) -> bool {
        self.get_pieces(Some(color))
            .into_iter()
            .any(|piece| Board::includes_move(&movegen::reach(piece, self), square))
    }

    /// Whether any piece of `color` could capture on `square` were an enemy there.
    pub fn is_attacked_by(&self, color: Color, square: Square) -> bool {
        self.get_pieces(Some(color))
            .into_iter()
            .any(|piece| Board::includes_move(&movegen::attacked_squares(piece, self), square))
    }

    pub fn king_location(&self, color: Color) -> Option<Square> {
        self.get_pieces(Some(color))
            .into_iter()
            .find(|piece| piece.kind() == PieceKind::King)
            .map(|king| king.location())
    }

    /// Whether the enemy could move onto `color`'s king.
    ///
    /// # Panics
    /// If `color` has no king on the board. Check is undefined there, so the
    /// position itself is invalid.
    pub fn is_in_check(&self, color: Color) -> bool {
        let king_sq = self.king_location(color)
            .unwrap_or_else(|| panic!("no {:?} king on the board to evaluate check against", color));
        self.color_can_move_there(color.opponent(), king_sq)
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Destinations the piece on `sq` may actually move to.
    pub fn legal_moves(&self, sq: Square) -> Vec<Square> {
        let Some(piece) = self.piece_at(sq).copied() else { return Vec::new() };
        piece.possible_moves(self)
            .into_iter()
            .filter(|&dest| {
                let plan = self.plan_move(&piece, dest);
                !self.leaves_king_in_check(&plan, piece.color())
            })
            .collect()
    }

    pub fn all_legal_moves(&self, color: Color) -> Vec<(Square, Square)> {
        let origins: Vec<Square> = self.get_pieces(Some(color)).iter().map(|p| p.location()).collect();
        let mut moves = Vec::new();
        for origin in origins {
            moves.extend(self.legal_moves(origin).into_iter().map(|dest| (origin, dest)));
        }
        moves
    }

    pub fn status(&self, color: Color) -> GameStatus {
        let in_check = self.is_in_check(color);
        let can_move = !self.all_legal_moves(color).is_empty();
        match (in_check, can_move) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Ongoing,
        }
    }

    // --- Placement ---

    /// Places `piece` on `sq`, updating its location. Whatever stood there is
    /// removed from the board and handed back. If the piece is still standing
    /// on the square it claims, that copy is lifted off first, so relocating a
    /// piece read from the board never duplicates it. This does not record a
    /// move; use `move_piece` for play.
    pub fn set_location(&mut self, mut piece: Piece, sq: Square) -> Result<Option<Piece>, MoveError> {
        if !sq.is_in_bounds() { return Err(MoveError::OutOfBounds(sq)); }
        let from = piece.location();
        if from != sq && self.piece_at(from) == Some(&piece) {
            self.take(from);
        }
        piece.set_location(sq);
        Ok(self.cell_mut(sq).replace(piece))
    }

    pub fn remove_piece(&mut self, sq: Square) -> Result<Option<Piece>, MoveError> {
        if !sq.is_in_bounds() { return Err(MoveError::OutOfBounds(sq)); }
        Ok(self.take(sq))
    }

    // --- Move Application ---

    fn plan_move(&self, piece: &Piece, destination: Square) -> MovePlan {
        let origin = piece.location();
        let capture_square = if self.piece_at(destination).is_some() {
            Some(destination)
        } else if piece.kind() == PieceKind::Pawn && destination.col != origin.col {
            Some(Square::new(origin.row, destination.col)) // en passant
        } else {
            None
        };

        let rook_move = if piece.kind() == PieceKind::King && destination.row == origin.row {
            CastleSide::from_king_hop(destination.col - origin.col)
                .map(|side| (origin.offset(0, side.rook_distance()), origin.offset(0, side.direction())))
        } else {
            None
        };

        MovePlan { origin, destination, capture_square, rook_move }
    }

    /// Moves pieces per `plan` without touching move counts or history.
    /// Returns the captured piece, if any.
    fn apply_plan(&mut self, plan: &MovePlan) -> Option<Piece> {
        let captured = plan.capture_square.and_then(|sq| self.take(sq));
        if let Some(mut piece) = self.take(plan.origin) {
            piece.set_location(plan.destination);
            self.put(piece);
        }
        if let Some((from, to)) = plan.rook_move {
            if let Some(mut rook) = self.take(from) {
                rook.set_location(to);
                self.put(rook);
            }
        }
        captured
    }

    /// Plays `plan` on a scratch copy of the grid and tests the mover's king.
    /// History is left behind: attack geometry never depends on it.
    fn leaves_king_in_check(&self, plan: &MovePlan, color: Color) -> bool {
        let mut scratch = Board { grid: self.grid, history: Vec::new(), default_promotion: self.default_promotion };
        scratch.apply_plan(plan);
        let in_check = scratch.is_in_check(color);
        trace!("Simulated {} -> {}: {:?} in check = {}", plan.origin, plan.destination, color, in_check);
        in_check
    }

    /// Applies a validated plan for real and records it.
    fn commit(&mut self, piece: Piece, plan: MovePlan, promotion: Option<PieceKind>) -> MoveRecord {
        let captured = self.apply_plan(&plan);

        if let Some(moved) = self.cell_mut(plan.destination).as_mut() {
            moved.count_move();
            if let Some(kind) = promotion {
                *moved = moved.promoted_to(kind);
                info!("{:?} pawn promoted to {:?} on {}", moved.color(), kind, plan.destination);
            }
        }
        if let Some((rook_from, rook_to)) = plan.rook_move {
            if let Some(rook) = self.cell_mut(rook_to).as_mut() {
                rook.count_move();
            }
            info!("{:?} castled: king {} -> {}, rook {} -> {}",
                piece.color(), plan.origin, plan.destination, rook_from, rook_to);
        }

        let record = MoveRecord {
            piece,
            origin: plan.origin,
            destination: plan.destination,
            captured,
            rook_move: plan.rook_move,
            promotion,
        };
        self.history.push(record);
        record
    }

    /// Legality-checked move. Returns false and leaves the board untouched
    /// when the move is refused for any reason.
    pub fn move_piece(&mut self, origin: Square, destination: Square) -> bool {
        self.try_move(origin, destination).is_ok()
    }

    pub fn try_move(&mut self, origin: Square, destination: Square) -> Result<MoveRecord, MoveError> {
        self.try_move_with(origin, destination, &mut None::<PieceKind>)
    }

    pub fn try_move_with(
        &mut self,
        origin: Square,
        destination: Square,
        hook: &mut dyn PromotionHook,
    ) -> Result<MoveRecord, MoveError> {
        let piece = *self.at_location(origin)?.ok_or(MoveError::NoPieceAtOrigin(origin))?;
        if !destination.is_in_bounds() {
            return Err(MoveError::OutOfBounds(destination));
        }

        if !Board::includes_move(&piece.possible_moves(self), destination) {
            debug!("Rejected {} -> {}: not a destination for {:?}", origin, destination, piece.kind());
            return Err(MoveError::IllegalMove { from: origin, to: destination });
        }

        let plan = self.plan_move(&piece, destination);
        if self.leaves_king_in_check(&plan, piece.color()) {
            debug!("Rejected {} -> {}: leaves {:?} king in check", origin, destination, piece.color());
            return Err(MoveError::LeavesKingInCheck { from: origin, to: destination });
        }

        let promotion = if piece.kind() == PieceKind::Pawn && destination.row == piece.color().promotion_row() {
            let choice = hook.promotion_choice(&piece, destination).unwrap_or(self.default_promotion);
            Some(piece.promote(choice)?.kind())
        } else {
            None
        };

        Ok(self.commit(piece, plan, promotion))
    }

    /// Takes back the most recent move, restoring the board exactly,
    /// move counts included.
    pub fn undo_move(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;

        self.take(record.destination);
        self.put(record.piece);

        if let Some((rook_from, rook_to)) = record.rook_move {
            let mut rook = self.take(rook_to)
                .unwrap_or_else(|| panic!("history out of sync: no castled rook on {}", rook_to));
            rook.set_location(rook_from);
            rook.uncount_move();
            self.put(rook);
        }
        if let Some(captured) = record.captured {
            self.put(captured);
        }

        debug!("Undid {}", record.to_algebraic_string());
        Some(record)
    }

    /// Re-applies recorded moves through the legality-checked entry point.
    pub fn replay(&mut self, records: &[MoveRecord]) -> Result<(), MoveError> {
        for record in records {
            let mut choice = record.promotion;
            self.try_move_with(record.origin, record.destination, &mut choice)?;
        }
        Ok(())
    }

    pub fn history_json(&self) -> Result<String, SaveLoadError> {
        history::to_json(&self.history)
    }

    pub fn save_history(&self, path: &str) -> Result<(), SaveLoadError> {
        history::save_history(&self.history, path)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for (row, cells) in self.grid.iter().enumerate() {
            write!(f, "{} | ", 8 - row)?;
            for cell in cells {
                match cell {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")
    }
}
