//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth. Castling and en
//! passant are not part of these rules and promotion always picks a queen,
//! so only positions where none of those occur match published counts.

use super::{all_legal_moves, apply_move};
use crate::Position;
use chess_core::Piece;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        let new_pos = apply_move(position, m, Some(Piece::Queen));
        nodes += perft(&new_pos, depth - 1);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = all_legal_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        let new_pos = apply_move(position, m, Some(Piece::Queen));
        let nodes = if depth > 1 {
            perft(&new_pos, depth - 1)
        } else {
            1
        };
        results.push((m.to_coord(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
