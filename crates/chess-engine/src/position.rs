//! Chess position representation.

use chess_core::{Color, ColoredPiece, Fen, FenError, Piece, Square};
use thiserror::Error;

use crate::movegen::is_square_attacked;
use crate::Board;

/// Errors raised when a board cannot form a playable position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    ExtraKing(Color),

    #[error("{0} king is attacked while it is {1}'s turn to move")]
    KingCapturable(Color, Color),
}

/// A board plus the side to move.
///
/// Each side always has exactly one king. Its square is cached and kept
/// current as moves are made, so legality checks never scan for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    kings: [Square; 2],
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    ///
    /// Castling, en passant and clock fields are accepted and discarded.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let parsed = Fen::parse(fen)?;
        Self::from_board(Board::from_placement(parsed.placement), parsed.side_to_move)
    }

    /// Builds a position from a board, validating the king invariant.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Self, PositionError> {
        let mut kings = [Square::A8; 2];
        for color in Color::ALL {
            let mut found = board
                .pieces_of(color)
                .filter(|(_, p)| p.piece == Piece::King)
                .map(|(sq, _)| sq);
            kings[color.index()] = found.next().ok_or(PositionError::MissingKing(color))?;
            if found.next().is_some() {
                return Err(PositionError::ExtraKing(color));
            }
        }

        let waiting = side_to_move.opposite();
        if is_square_attacked(&board, kings[waiting.index()], side_to_move) {
            return Err(PositionError::KingCapturable(waiting, side_to_move));
        }

        Ok(Position {
            board,
            side_to_move,
            kings,
        })
    }

    /// Converts the position to a FEN string.
    ///
    /// The castling field is always `KQkq` and the trailing fields `- 0 1`.
    pub fn to_fen(&self) -> String {
        Fen {
            placement: *self.board.placement(),
            side_to_move: self.side_to_move,
        }
        .to_fen()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        self.board.get(sq)
    }

    /// Returns the square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Moves a piece, keeping the king cache current. Returns the captured piece.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<ColoredPiece> {
        let moving = self.board.get(from);
        let captured = self.board.relocate(from, to);
        if let Some(p) = moving.filter(|p| p.piece == Piece::King) {
            self.kings[p.color.index()] = to;
        }
        captured
    }

    /// Replaces the piece on `sq` with a promoted piece.
    pub(crate) fn promote(&mut self, sq: Square, piece: ColoredPiece) {
        debug_assert!(piece.piece.is_promotion_target());
        self.board.set(sq, Some(piece));
    }

    pub(crate) fn pass_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), Fen::STARTPOS);
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn castling_field_is_always_full() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 12 40").unwrap();
        assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/4K3 b KQkq - 0 1");
    }

    #[test]
    fn piece_at() {
        let pos = Position::startpos();
        assert_eq!(
            pos.piece_at(sq("e1")),
            Some(ColoredPiece::new(Piece::King, Color::White))
        );
        assert_eq!(
            pos.piece_at(sq("e8")),
            Some(ColoredPiece::new(Piece::King, Color::Black))
        );
        assert_eq!(pos.piece_at(sq("e4")), None);
    }

    #[test]
    fn king_squares_cached() {
        let pos = Position::startpos();
        assert_eq!(pos.king_square(Color::White), sq("e1"));
        assert_eq!(pos.king_square(Color::Black), sq("e8"));
    }

    #[test]
    fn relocating_king_updates_cache() {
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        pos.relocate(sq("e1"), sq("d2"));
        assert_eq!(pos.king_square(Color::White), sq("d2"));
        assert_eq!(pos.board().find_king(Color::White), Some(sq("d2")));
    }

    #[test]
    fn missing_king_rejected() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::MissingKing(Color::Black))
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/8 b - - 0 1"),
            Err(PositionError::MissingKing(Color::White))
        );
    }

    #[test]
    fn extra_king_rejected() {
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/K3K3 w - - 0 1"),
            Err(PositionError::ExtraKing(Color::White))
        );
    }

    #[test]
    fn capturable_king_rejected() {
        // White to move with the black king already in check from the rook.
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/K3R3 w - - 0 1"),
            Err(PositionError::KingCapturable(Color::Black, Color::White))
        );
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/K3R3 b - - 0 1").is_ok());
    }

    #[test]
    fn fen_errors_propagate() {
        assert!(matches!(
            Position::from_fen("garbage"),
            Err(PositionError::Fen(FenError::InvalidPartCount(1)))
        ));
    }

    #[test]
    fn position_default() {
        assert_eq!(Position::default().to_fen(), Fen::STARTPOS);
    }
}
