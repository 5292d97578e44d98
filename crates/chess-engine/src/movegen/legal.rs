//! Legal move filtering.

use super::{is_square_attacked, pseudo_legal_targets, TargetList};
use crate::Position;
use chess_core::{Color, CoordMove, Piece, Square};

/// Returns true if moving the piece on `from` to `to` would leave its own
/// king attacked.
///
/// The move is simulated on a scratch copy of the board. Promotion does not
/// change the outcome, so the unpromoted pawn is used.
pub fn would_expose_own_king(position: &Position, from: Square, to: Square) -> bool {
    let Some(mover) = position.piece_at(from) else {
        return false;
    };

    let mut scratch = position.board().clone();
    scratch.relocate(from, to);

    let king = if mover.piece == Piece::King {
        to
    } else {
        position.king_square(mover.color)
    };
    is_square_attacked(&scratch, king, mover.color.opposite())
}

/// Generates the legal destinations for the piece on `from`.
///
/// The piece's color decides legality; whose turn it is does not.
pub fn legal_moves(position: &Position, from: Square) -> TargetList {
    let mut targets = pseudo_legal_targets(position.board(), from);
    targets.retain(|&to| !would_expose_own_king(position, from, to));
    targets
}

/// Returns true if `color`'s king is currently attacked.
pub fn is_king_attacked(position: &Position, color: Color) -> bool {
    is_square_attacked(position.board(), position.king_square(color), color.opposite())
}

/// Collects every legal move for the side to move, in board order.
pub fn all_legal_moves(position: &Position) -> Vec<CoordMove> {
    let side = position.side_to_move();
    let mut moves = Vec::new();
    for (from, _) in position.board().pieces_of(side) {
        for &to in &legal_moves(position, from) {
            moves.push(CoordMove::new(from, to));
        }
    }
    moves
}

/// Returns true if the side to move has at least one legal move.
pub fn has_legal_moves(position: &Position) -> bool {
    position
        .board()
        .pieces_of(position.side_to_move())
        .any(|(from, _)| !legal_moves(position, from).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let pos = Position::startpos();
        assert_eq!(all_legal_moves(&pos).len(), 20);
        assert!(has_legal_moves(&pos));
        assert!(!is_king_attacked(&pos, Color::White));
    }

    #[test]
    fn legal_moves_are_idempotent() {
        let pos = Position::startpos();
        assert_eq!(legal_moves(&pos, sq("b1")), legal_moves(&pos, sq("b1")));
        assert_eq!(all_legal_moves(&pos), all_legal_moves(&pos));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // Knight on e2 is pinned against the king by the rook on e8.
        let pos = Position::from_fen("k3r3/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(legal_moves(&pos, sq("e2")).is_empty());
        assert!(would_expose_own_king(&pos, sq("e2"), sq("c3")));
    }

    #[test]
    fn pinned_rook_slides_along_pin() {
        let pos = Position::from_fen("k3r3/8/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
        let targets = legal_moves(&pos, sq("e2"));
        assert!(targets.contains(sq("e8")));
        assert!(targets.contains(sq("e5")));
        assert!(!targets.contains(sq("d2")));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let pos = Position::from_fen("k7/8/8/8/8/8/3r4/4K3 w - - 0 1").unwrap();
        let targets = legal_moves(&pos, sq("e1"));
        // d2 is defended by nothing, so the king may capture there.
        assert!(targets.contains(sq("d2")));
        assert!(!targets.contains(sq("e2")));
        assert!(!targets.contains(sq("d1")));
        assert!(targets.contains(sq("f1")));
    }

    #[test]
    fn check_must_be_answered() {
        // Black rook checks along the e-file; only moves that resolve it remain.
        let pos = Position::from_fen("k3r3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(is_king_attacked(&pos, Color::White));
        for m in all_legal_moves(&pos) {
            let next = crate::movegen::make_move(&pos, m, Some(Piece::Queen)).unwrap();
            assert!(!is_king_attacked(&next, Color::White), "{} leaves check", m);
        }
        // Qd1-e2 blocks the check.
        assert!(all_legal_moves(&pos).contains(&CoordMove::parse("d1e2").unwrap()));
    }

    #[test]
    fn legality_ignores_turn() {
        let pos = Position::startpos();
        assert_eq!(legal_moves(&pos, sq("g8")).len(), 2);
    }
}
