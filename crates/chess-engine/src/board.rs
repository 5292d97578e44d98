//! The 8x8 grid of optional pieces.

use chess_core::{Color, ColoredPiece, Fen, Piece, Placement, Square};
use std::fmt;

/// An 8x8 board. Row 0 is rank 8, column 0 is file a.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: Placement,
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates the standard starting arrangement.
    pub fn standard() -> Self {
        Board::from_placement(Fen::default().placement)
    }

    pub const fn from_placement(squares: Placement) -> Self {
        Board { squares }
    }

    pub fn placement(&self) -> &Placement {
        &self.squares
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<ColoredPiece> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<ColoredPiece>) {
        self.squares[sq.row() as usize][sq.col() as usize] = piece;
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Moves whatever is on `from` to `to`, overwriting the destination.
    ///
    /// Returns the piece that stood on `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<ColoredPiece> {
        let moving = self.get(from);
        let captured = self.get(to);
        self.set(to, moving);
        self.set(from, None);
        captured
    }

    /// Iterates over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares holding pieces of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, ColoredPiece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Returns the number of pieces `color` has on the board, king included.
    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Finds the king of `color` by scanning the grid.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.piece == Piece::King)
            .map(|(sq, _)| sq)
    }

    /// Draws the board as text with rank and file labels.
    ///
    /// When `flipped` is true the board is drawn from Black's side.
    pub fn render(&self, flipped: bool) -> String {
        let order = display_order(flipped);

        let mut out = String::new();
        for row in order {
            out.push((b'8' - row) as char);
            out.push(' ');
            for col in order {
                let c = Square::new(row, col)
                    .and_then(|sq| self.get(sq))
                    .map(|p| p.to_fen_char())
                    .unwrap_or('.');
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out.push_str("  ");
        for col in order {
            out.push(' ');
            out.push((b'a' + col) as char);
        }
        out
    }
}

fn display_order(flipped: bool) -> [u8; 8] {
    if flipped {
        [7, 6, 5, 4, 3, 2, 1, 0]
    } else {
        [0, 1, 2, 3, 4, 5, 6, 7]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", Fen::placement_string(&self.squares))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}
