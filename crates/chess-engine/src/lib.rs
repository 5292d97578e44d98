//! Chess rules engine on a plain 8x8 grid.
//!
//! This crate provides:
//! - [`Board`] - the grid of optional pieces
//! - [`Position`] - board, side to move and cached king squares
//! - [`Game`] - turn flow, promotion choice, history and captured pieces
//! - [`RuleSet`] - trait for the rules a game is played under
//! - Move generation, legality filtering and attack detection
//! - Move notation for the game record
//!
//! Castling and en passant are not part of these rules. A game ends in
//! checkmate, stalemate or an insufficient-material draw.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, MoveOrigin};
//! use chess_core::CoordMove;
//!
//! let mut game = Game::new();
//! game.play(CoordMove::parse("e2e4").unwrap(), MoveOrigin::Human).unwrap();
//! game.play(CoordMove::parse("e7e5").unwrap(), MoveOrigin::Human).unwrap();
//! assert_eq!(
//!     game.position_string(),
//!     "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1"
//! );
//! ```

mod board;
mod game;
pub mod movegen;
pub mod notation;
mod position;
pub mod rules;

pub use board::Board;
pub use game::{
    ClickOutcome, Game, GameError, MoveOrigin, MoveOutcome, MoveRecord, PendingPromotion, Phase,
};
pub use movegen::{
    all_legal_moves, can_attack, has_legal_moves, is_king_attacked, is_path_clear,
    is_square_attacked, legal_moves, make_move, pseudo_legal_moves, would_expose_own_king,
    TargetList,
};
pub use notation::move_notation;
pub use position::{Position, PositionError};
pub use rules::{CasualChess, DrawReason, GameStatus, RuleSet};
