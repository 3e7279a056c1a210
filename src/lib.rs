//! Rules core for standard chess: board state, per-piece move generation,
//! self-check legality, and the special moves (castling, en passant,
//! promotion). Rendering, input and turn management belong to the caller.

pub mod board;
pub mod config;
pub mod error;
pub mod history;
pub mod movegen;
pub mod piece;
pub mod types;

pub use board::{Board, GameStatus, PromotionHook};
pub use config::Config;
pub use error::{MoveError, SaveLoadError};
pub use history::MoveRecord;
pub use piece::Piece;
pub use types::{Color, PieceKind, Square};
