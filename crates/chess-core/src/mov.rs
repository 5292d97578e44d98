//! Coordinate move representation.

use crate::Square;
use std::fmt;

/// A move given only by its origin and destination squares.
///
/// This is the 4-character form (`e2e4`) exchanged with external move
/// selectors. A trailing promotion letter is accepted on input but not
/// interpreted; promotion choice belongs to the game, not the move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordMove {
    pub from: Square,
    pub to: Square,
}

impl CoordMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        CoordMove { from, to }
    }

    /// Decodes a coordinate move.
    ///
    /// Characters 0-1 are the origin, 2-3 the destination. Anything shorter
    /// than four characters, or with a file outside `a..h` or a rank outside
    /// `1..8`, yields `None`. Characters past the fourth are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let from = Square::from_chars(chars.next()?, chars.next()?)?;
        let to = Square::from_chars(chars.next()?, chars.next()?)?;
        Some(CoordMove { from, to })
    }

    /// Encodes the move as four characters.
    pub fn to_coord(self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Debug for CoordMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoordMove({}{})", self.from, self.to)
    }
}

impl fmt::Display for CoordMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn decode_e2e4() {
        let m = CoordMove::parse("e2e4").unwrap();
        assert_eq!(m.from, sq(6, 4));
        assert_eq!(m.to, sq(4, 4));
    }

    #[test]
    fn decode_e7e5() {
        let m = CoordMove::parse("e7e5").unwrap();
        assert_eq!(m.from, sq(1, 4));
        assert_eq!(m.to, sq(3, 4));
    }

    #[test]
    fn decode_ignores_promotion_suffix() {
        let m = CoordMove::parse("a7a8q").unwrap();
        assert_eq!(m.from, sq(1, 0));
        assert_eq!(m.to, sq(0, 0));
    }

    #[test]
    fn decode_malformed() {
        assert!(CoordMove::parse("").is_none());
        assert!(CoordMove::parse("e2").is_none());
        assert!(CoordMove::parse("e2e").is_none());
        assert!(CoordMove::parse("e2e9").is_none());
        assert!(CoordMove::parse("z2e4").is_none());
        assert!(CoordMove::parse("0000").is_none());
    }

    #[test]
    fn debug_display() {
        let m = CoordMove::new(sq(6, 4), sq(4, 4));
        assert_eq!(format!("{:?}", m), "CoordMove(e2e4)");
        assert_eq!(format!("{}", m), "e2e4");
        assert_eq!(m.to_coord(), "e2e4");
    }

    proptest! {
        #[test]
        fn encoding_decodes_to_same_squares(
            fr in 0u8..8, fc in 0u8..8, tr in 0u8..8, tc in 0u8..8
        ) {
            let m = CoordMove::new(sq(fr, fc), sq(tr, tc));
            prop_assert_eq!(CoordMove::parse(&m.to_coord()), Some(m));
        }

        #[test]
        fn arbitrary_text_never_panics(s in "\\PC{0,8}") {
            let _ = CoordMove::parse(&s);
        }
    }
}
