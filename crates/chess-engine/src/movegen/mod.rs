//! Move generation.
//!
//! Pseudo-legal destinations are produced per piece kind by a `match` on
//! [`Piece`]; the [`legal`] filter then removes destinations that leave the
//! mover's own king attacked. Castling and en passant are never generated.

mod attacks;
mod legal;
pub mod perft;

use crate::{Board, Position};
use chess_core::{Color, ColoredPiece, CoordMove, Piece, Square};

pub use attacks::{can_attack, is_path_clear, is_square_attacked};
pub use legal::{
    all_legal_moves, has_legal_moves, is_king_attacked, legal_moves, would_expose_own_king,
};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Destination squares for a single piece, with a fixed capacity.
///
/// A queen in the open reaches 27 squares, the most any piece can, so
/// generation never allocates.
#[derive(Clone)]
pub struct TargetList {
    squares: [Square; Self::MAX_TARGETS],
    len: usize,
}

impl TargetList {
    /// Capacity of the list.
    pub const MAX_TARGETS: usize = 32;

    /// Creates an empty target list.
    #[inline]
    pub const fn new() -> Self {
        TargetList {
            squares: [Square::A8; Self::MAX_TARGETS],
            len: 0,
        }
    }

    /// Adds a square to the list.
    #[inline]
    pub fn push(&mut self, sq: Square) {
        debug_assert!(self.len < Self::MAX_TARGETS);
        self.squares[self.len] = sq;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.as_slice().contains(&sq)
    }

    /// Retains only squares for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Square) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.squares[read]) {
                self.squares[write] = self.squares[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for TargetList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TargetList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for TargetList {}

impl std::ops::Index<usize> for TargetList {
    type Output = Square;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.squares[index]
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for TargetList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates pseudo-legal destinations for the piece on `from`.
///
/// Returns an empty list for an empty square. Whose turn it is plays no part.
pub fn pseudo_legal_moves(position: &Position, from: Square) -> TargetList {
    pseudo_legal_targets(position.board(), from)
}

pub(crate) fn pseudo_legal_targets(board: &Board, from: Square) -> TargetList {
    let mut targets = TargetList::new();
    let Some(mover) = board.get(from) else {
        return targets;
    };
    let color = mover.color;

    match mover.piece {
        Piece::Pawn => generate_pawn_moves(board, from, color, &mut targets),
        Piece::Knight => generate_step_moves(board, from, color, &KNIGHT_OFFSETS, &mut targets),
        Piece::Bishop => generate_ray_moves(board, from, color, &BISHOP_DIRECTIONS, &mut targets),
        Piece::Rook => generate_ray_moves(board, from, color, &ROOK_DIRECTIONS, &mut targets),
        Piece::Queen => {
            generate_ray_moves(board, from, color, &BISHOP_DIRECTIONS, &mut targets);
            generate_ray_moves(board, from, color, &ROOK_DIRECTIONS, &mut targets);
        }
        Piece::King => generate_step_moves(board, from, color, &KING_OFFSETS, &mut targets),
    }

    targets
}

/// Pushes, double pushes from the home row, and diagonal captures.
fn generate_pawn_moves(board: &Board, from: Square, color: Color, targets: &mut TargetList) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0).filter(|&sq| board.is_empty(sq)) {
        targets.push(one);
        if from.row() == color.pawn_row() {
            if let Some(two) = from.offset(2 * dir, 0).filter(|&sq| board.is_empty(sq)) {
                targets.push(two);
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc) {
            if board.get(to).is_some_and(|p| p.color != color) {
                targets.push(to);
            }
        }
    }
}

/// Single-step pieces: knight and king.
fn generate_step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    targets: &mut TargetList,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            if board.get(to).map_or(true, |p| p.color != color) {
                targets.push(to);
            }
        }
    }
}

/// Sliding pieces: walk each direction until the edge or the first piece.
fn generate_ray_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    targets: &mut TargetList,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match board.get(next) {
                None => targets.push(next),
                Some(p) => {
                    if p.color != color {
                        targets.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// Returns the position after playing `m`, or `None` if `m` is not a legal
/// move for the side to move.
///
/// `promotion` only takes effect when a pawn lands on its promotion row;
/// passing `None` there leaves the pawn on the last row.
pub fn make_move(
    position: &Position,
    m: CoordMove,
    promotion: Option<Piece>,
) -> Option<Position> {
    let mover = position.piece_at(m.from)?;
    if mover.color != position.side_to_move() || !legal_moves(position, m.from).contains(m.to) {
        return None;
    }
    Some(apply_move(position, m, promotion))
}

/// Plays `m` without checking it. Callers pass moves from the legal
/// generator only.
pub(crate) fn apply_move(
    position: &Position,
    m: CoordMove,
    promotion: Option<Piece>,
) -> Position {
    let mut next = position.clone();
    let mover = next.piece_at(m.from);
    next.relocate(m.from, m.to);

    if let (Some(mover), Some(kind)) = (mover, promotion) {
        if mover.piece == Piece::Pawn && m.to.row() == mover.color.promotion_row() {
            next.promote(m.to, ColoredPiece::new(kind, mover.color));
        }
    }

    next.pass_turn();
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn names(targets: &TargetList) -> Vec<String> {
        let mut v: Vec<String> = targets.as_slice().iter().map(|s| s.to_algebraic()).collect();
        v.sort();
        v
    }

    #[test]
    fn empty_square_has_no_moves() {
        let pos = Position::startpos();
        assert!(pseudo_legal_moves(&pos, sq("e4")).is_empty());
    }

    #[test]
    fn pawn_single_and_double_push() {
        let pos = Position::startpos();
        assert_eq!(names(&pseudo_legal_moves(&pos, sq("e2"))), ["e3", "e4"]);
        assert_eq!(names(&pseudo_legal_moves(&pos, sq("d7"))), ["d5", "d6"]);
    }

    #[test]
    fn pawn_double_push_only_from_home_row() {
        let pos = Position::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        assert_eq!(names(&pseudo_legal_moves(&pos, sq("e3"))), ["e4"]);
    }

    #[test]
    fn pawn_blocked() {
        // Blocked directly: no pushes at all.
        let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(pseudo_legal_moves(&pos, sq("e2")).is_empty());

        // Blocked on the second square: single push only.
        let pos = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(names(&pseudo_legal_moves(&pos, sq("e2"))), ["e3"]);
    }

    #[test]
    fn pawn_captures_only_opponents() {
        let pos = Position::from_fen("4k3/8/8/8/8/3p1N2/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(names(&pseudo_legal_moves(&pos, sq("e2"))), ["d3", "e3", "e4"]);
    }

    #[test]
    fn pawn_reaching_last_row() {
        let pos = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(names(&pseudo_legal_moves(&pos, sq("a7"))), ["a8", "b8"]);
    }

    #[test]
    fn knight_moves() {
        let pos = Position::startpos();
        assert_eq!(names(&pseudo_legal_moves(&pos, sq("g1"))), ["f3", "h3"]);

        let pos = Position::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(pseudo_legal_moves(&pos, sq("d4")).len(), 8);
    }

    #[test]
    fn rook_rays_stop_at_pieces() {
        let pos = Position::from_fen("4k3/8/8/3p4/8/8/3R2P1/4K3 w - - 0 1").unwrap();
        assert_eq!(
            names(&pseudo_legal_moves(&pos, sq("d2"))),
            ["a2", "b2", "c2", "d1", "d3", "d4", "d5", "e2", "f2"]
        );
    }

    #[test]
    fn bishop_rays() {
        let pos = Position::startpos();
        assert!(pseudo_legal_moves(&pos, sq("c1")).is_empty());

        let pos = Position::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
        assert_eq!(
            names(&pseudo_legal_moves(&pos, sq("c1"))),
            ["a3", "b2", "d2", "e3", "f4", "g5", "h6"]
        );
    }

    #[test]
    fn queen_in_open_reaches_27() {
        let pos = Position::from_fen("k7/8/8/8/3Q4/8/8/7K w - - 0 1").unwrap();
        assert_eq!(pseudo_legal_moves(&pos, sq("d4")).len(), 27);
    }

    #[test]
    fn king_never_castles() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(
            names(&pseudo_legal_moves(&pos, sq("e1"))),
            ["d1", "d2", "e2", "f1", "f2"]
        );
    }

    #[test]
    fn target_list_retain() {
        let mut list = TargetList::new();
        list.push(sq("a1"));
        list.push(sq("b2"));
        list.push(sq("c3"));
        list.retain(|s| *s != sq("b2"));
        assert_eq!(list.as_slice(), &[sq("a1"), sq("c3")]);
        assert!(list.contains(sq("c3")));
        assert!(!list.contains(sq("b2")));
    }

    #[test]
    fn make_move_promotes_and_flips_turn() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let next = make_move(
            &pos,
            CoordMove::parse("a7a8").unwrap(),
            Some(Piece::Queen),
        )
        .unwrap();
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.to_fen(), "Q3k3/8/8/8/8/8/8/4K3 b KQkq - 0 1");
    }

    #[test]
    fn make_move_ignores_promotion_for_other_moves() {
        let pos = Position::startpos();
        let next =
            make_move(&pos, CoordMove::parse("g1f3").unwrap(), Some(Piece::Queen)).unwrap();
        assert_eq!(
            next.to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 0 1"
        );
    }

    #[test]
    fn make_move_rejects_king_capture() {
        let pos = Position::startpos();
        assert!(make_move(&pos, CoordMove::parse("d1e8").unwrap(), None).is_none());

        // The checking queen never gets a turn to take the king.
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(make_move(&pos, CoordMove::parse("d1d8").unwrap(), None).is_some());
        let next = make_move(&pos, CoordMove::parse("d1d8").unwrap(), None).unwrap();
        assert!(make_move(&next, CoordMove::parse("e8d8").unwrap(), None).is_some());
        assert!(make_move(&next, CoordMove::parse("d8e8").unwrap(), None).is_none());
    }

    #[test]
    fn make_move_rejects_illegal_moves() {
        let pos = Position::startpos();
        // Wrong side to move.
        assert!(make_move(&pos, CoordMove::parse("e7e5").unwrap(), None).is_none());
        // Empty origin square.
        assert!(make_move(&pos, CoordMove::parse("e4e5").unwrap(), None).is_none());
        // Not a pawn move.
        assert!(make_move(&pos, CoordMove::parse("e2e5").unwrap(), None).is_none());

        // Pinned knight stays put.
        let pos = Position::from_fen("k3r3/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(make_move(&pos, CoordMove::parse("e2c3").unwrap(), None).is_none());
    }
}
