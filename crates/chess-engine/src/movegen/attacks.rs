//! Attack detection.
//!
//! Attacks are tested geometrically from each attacker toward the target
//! square, using the same movement patterns as move generation. Pawn attack
//! direction is fixed by the attacking pawn's own color.

use crate::Board;
use chess_core::{Color, ColoredPiece, Piece, Square};

/// Returns true if any piece of `by` attacks `target` on `board`.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, attacker)| can_attack(board, from, target, attacker))
}

/// Returns true if `attacker`, standing on `from`, attacks `target`.
///
/// Occupancy of `target` itself is not considered.
pub fn can_attack(board: &Board, from: Square, target: Square, attacker: ColoredPiece) -> bool {
    if from == target {
        return false;
    }

    let dr = target.row() as i8 - from.row() as i8;
    let dc = target.col() as i8 - from.col() as i8;
    let orthogonal = dr == 0 || dc == 0;
    let diagonal = dr.abs() == dc.abs();

    match attacker.piece {
        Piece::Pawn => dr == attacker.color.pawn_direction() && dc.abs() == 1,
        Piece::Knight => {
            (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2)
        }
        Piece::Bishop => diagonal && is_path_clear(board, from, target),
        Piece::Rook => orthogonal && is_path_clear(board, from, target),
        Piece::Queen => (orthogonal || diagonal) && is_path_clear(board, from, target),
        Piece::King => dr.abs() <= 1 && dc.abs() <= 1,
    }
}

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// The squares must share a row, column or diagonal.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let dr = to.row() as i8 - from.row() as i8;
    let dc = to.col() as i8 - from.col() as i8;
    debug_assert!(
        dr == 0 || dc == 0 || dr.abs() == dc.abs(),
        "is_path_clear called with unaligned squares {} and {}",
        from,
        to
    );

    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut current = from.offset(step_r, step_c);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        current = sq.offset(step_r, step_c);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn board(fen: &str) -> Board {
        Position::from_fen(fen).unwrap().board().clone()
    }

    #[test]
    fn pawn_attack_direction_follows_pawn_color() {
        let b = board("4k3/8/8/3p4/8/8/4P3/4K3 w - - 0 1");
        // White pawn on e2 attacks d3 and f3, never d1/f1.
        assert!(is_square_attacked(&b, sq("d3"), Color::White));
        assert!(is_square_attacked(&b, sq("f3"), Color::White));
        assert!(!is_square_attacked(&b, sq("e3"), Color::White));
        // Black pawn on d5 attacks c4 and e4.
        assert!(is_square_attacked(&b, sq("c4"), Color::Black));
        assert!(is_square_attacked(&b, sq("e4"), Color::Black));
        assert!(!is_square_attacked(&b, sq("c6"), Color::Black));
    }

    #[test]
    fn sliders_blocked_by_pieces() {
        let b = board("4k3/8/8/8/8/8/4P3/R3K2B w - - 0 1");
        // Rook on a1 sees along the first rank up to the king.
        assert!(can_attack(
            &b,
            sq("a1"),
            sq("d1"),
            ColoredPiece::new(Piece::Rook, Color::White)
        ));
        assert!(!can_attack(
            &b,
            sq("a1"),
            sq("f1"),
            ColoredPiece::new(Piece::Rook, Color::White)
        ));
        // Bishop on h1 sees the long diagonal.
        assert!(is_square_attacked(&b, sq("a8"), Color::White));
    }

    #[test]
    fn knight_and_king_patterns() {
        let b = board("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&b, sq("e6"), Color::White));
        assert!(is_square_attacked(&b, sq("b3"), Color::White));
        assert!(!is_square_attacked(&b, sq("d5"), Color::White));
        // King on e8 covers d7 but not d6.
        assert!(is_square_attacked(&b, sq("d7"), Color::Black));
        assert!(!is_square_attacked(&b, sq("d6"), Color::Black));
    }

    #[test]
    fn piece_does_not_attack_own_square() {
        let b = board("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1");
        assert!(!can_attack(
            &b,
            sq("d4"),
            sq("d4"),
            ColoredPiece::new(Piece::Queen, Color::White)
        ));
    }

    #[test]
    fn path_clear() {
        let b = Board::standard();
        assert!(!is_path_clear(&b, sq("a1"), sq("a8")));
        assert!(is_path_clear(&b, sq("a2"), sq("a7")));
        assert!(is_path_clear(&b, sq("b2"), sq("g7")));
        assert!(is_path_clear(&b, sq("e2"), sq("e3")));
        assert!(!is_path_clear(&b, sq("c1"), sq("e3")));
    }
}
