//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait. The [`Game`](crate::Game)
//! delegates legality and game-end decisions to the active rule set.

mod casual;

pub use casual::CasualChess;

use crate::{Position, TargetList};
use chess_core::{Color, Square};
use std::fmt;

/// State of a game after the latest move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has legal moves and material remains.
    Ongoing,
    /// The side to move is in check with no legal moves.
    Checkmate { winner: Color },
    /// The side to move has no legal moves but is not in check.
    Stalemate,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameStatus {
    /// Returns true unless the game is still being played.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// Returns the winner, if the game ended decisively.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "Game in progress"),
            GameStatus::Checkmate { winner } => write!(f, "{} wins by checkmate!", winner),
            GameStatus::Stalemate => write!(f, "Game drawn by stalemate!"),
            GameStatus::Draw(reason) => write!(f, "Game drawn by {}!", reason),
        }
    }
}

/// Reason for a draw other than stalemate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// Insufficient material to checkmate.
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::InsufficientMaterial => write!(f, "insufficient material"),
        }
    }
}

/// Trait for the rules a [`Game`](crate::Game) is played under.
///
/// # Example
///
/// ```
/// use chess_engine::rules::{CasualChess, GameStatus, RuleSet};
///
/// let position = CasualChess.initial_position();
/// assert_eq!(CasualChess.evaluate(&position), GameStatus::Ongoing);
/// ```
pub trait RuleSet {
    /// Returns the initial position.
    fn initial_position(&self) -> Position;

    /// Generates the legal destinations for the piece on `from`.
    fn legal_moves(&self, position: &Position, from: Square) -> TargetList;

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Evaluates the position for the side to move.
    fn evaluate(&self, position: &Position) -> GameStatus;

    /// Returns true if neither side is considered able to force checkmate.
    fn is_insufficient_material(&self, position: &Position) -> bool;

    /// Returns true if the game is over.
    fn is_game_over(&self, position: &Position) -> bool {
        self.evaluate(position).is_over()
    }
}
