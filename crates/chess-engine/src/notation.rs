//! Move notation for the game record.
//!
//! A reduced algebraic form: piece letter (none for pawns), capture marker,
//! destination square and promotion suffix. Check marks, disambiguation and
//! castling notation are never produced.
//! Examples: "e4", "Nf3", "Bxc6", "exd5", "e8=Q", "bxa1=N"

use chess_core::{Piece, Square};

/// Returns the uppercase letter used for `piece` in notation.
#[inline]
pub fn piece_letter(piece: Piece) -> char {
    piece.to_char().to_ascii_uppercase()
}

/// Formats a move for the game record.
///
/// `piece` is the piece that moved, before any promotion.
pub fn move_notation(
    piece: Piece,
    from: Square,
    to: Square,
    captured: bool,
    promotion: Option<Piece>,
) -> String {
    let mut notation = String::with_capacity(8);

    if piece != Piece::Pawn {
        notation.push(piece_letter(piece));
    }

    if captured {
        if piece == Piece::Pawn {
            notation.push(from.file_char());
        }
        notation.push('x');
    }

    notation.push(to.file_char());
    notation.push(to.rank_char());

    if let Some(kind) = promotion {
        notation.push('=');
        notation.push(piece_letter(kind));
    }

    notation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn quiet_moves() {
        assert_eq!(move_notation(Piece::Pawn, sq("e2"), sq("e4"), false, None), "e4");
        assert_eq!(move_notation(Piece::Knight, sq("g1"), sq("f3"), false, None), "Nf3");
        assert_eq!(move_notation(Piece::King, sq("e1"), sq("f1"), false, None), "Kf1");
    }

    #[test]
    fn captures() {
        assert_eq!(move_notation(Piece::Pawn, sq("e4"), sq("d5"), true, None), "exd5");
        assert_eq!(move_notation(Piece::Bishop, sq("b5"), sq("c6"), true, None), "Bxc6");
        assert_eq!(move_notation(Piece::Queen, sq("h5"), sq("f7"), true, None), "Qxf7");
    }

    #[test]
    fn promotions() {
        assert_eq!(
            move_notation(Piece::Pawn, sq("e7"), sq("e8"), false, Some(Piece::Queen)),
            "e8=Q"
        );
        assert_eq!(
            move_notation(Piece::Pawn, sq("b2"), sq("a1"), true, Some(Piece::Knight)),
            "bxa1=N"
        );
    }
}
