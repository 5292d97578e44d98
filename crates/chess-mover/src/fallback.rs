//! Uniform random legal move, used when the selector cannot answer.

use chess_core::CoordMove;
use chess_engine::{all_legal_moves, Position};
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks a legal move for the side to move uniformly at random.
///
/// Returns `None` when the side to move has no legal moves.
pub fn random_legal_move<R: Rng + ?Sized>(position: &Position, rng: &mut R) -> Option<CoordMove> {
    all_legal_moves(position).choose(rng).copied()
}
