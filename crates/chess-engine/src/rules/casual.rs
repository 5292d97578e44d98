//! The reduced rule set: no castling, no en passant, no clocks.

use super::{DrawReason, GameStatus, RuleSet};
use crate::movegen::{has_legal_moves, is_king_attacked, legal_moves};
use crate::{Position, TargetList};
use chess_core::{Color, Square};

/// Casual chess rules.
///
/// Pieces move as in standard chess, pawns promote on the last row, and
/// the game ends in checkmate, stalemate or a coarse insufficient-material
/// draw. Castling, en passant, repetition and move-count draws do not exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct CasualChess;

impl RuleSet for CasualChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn legal_moves(&self, position: &Position, from: Square) -> TargetList {
        legal_moves(position, from)
    }

    fn is_check(&self, position: &Position) -> bool {
        is_king_attacked(position, position.side_to_move())
    }

    fn evaluate(&self, position: &Position) -> GameStatus {
        let in_check = self.is_check(position);

        if !has_legal_moves(position) {
            return if in_check {
                GameStatus::Checkmate {
                    winner: position.side_to_move().opposite(),
                }
            } else {
                GameStatus::Stalemate
            };
        }

        if self.is_insufficient_material(position) {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }

        GameStatus::Ongoing
    }

    /// Bare kings, or a lone king against king and bishop or king and knight.
    ///
    /// Decided from piece counts alone; pawns and bishop colors are not
    /// examined beyond that.
    fn is_insufficient_material(&self, position: &Position) -> bool {
        let board = position.board();
        let has_minor =
            |color: Color| board.pieces_of(color).any(|(_, p)| p.piece.is_minor());

        match (board.count(Color::White), board.count(Color::Black)) {
            (1, 1) => true,
            (2, 1) => has_minor(Color::White),
            (1, 2) => has_minor(Color::Black),
            _ => false,
        }
    }
}
