//! Core types for chess.
//!
//! This crate provides the fundamental types used across the workspace:
//! - [`Piece`], [`ColoredPiece`] and [`Color`] for piece representation
//! - [`Square`] for grid coordinates (row 0 = rank 8, column 0 = file a)
//! - [`CoordMove`] for the 4-character coordinate move encoding
//! - [`Fen`] for position strings

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError, Placement};
pub use mov::CoordMove;
pub use piece::{ColoredPiece, Piece};
pub use square::Square;
