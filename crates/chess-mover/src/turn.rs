//! Playing the external side's turn.

use crate::{random_legal_move, MoveResponse, MoveSelector, MoverError};
use chess_core::CoordMove;
use chess_engine::{Game, MoveOrigin};
use rand::Rng;
use tracing::{info, warn};

/// The move played for the external side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalMove {
    /// The selector's move was played.
    Selected(CoordMove),
    /// The selector failed and a random legal move was played instead.
    Fallback(CoordMove),
}

impl ExternalMove {
    pub fn coord(self) -> CoordMove {
        match self {
            ExternalMove::Selected(m) | ExternalMove::Fallback(m) => m,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, ExternalMove::Fallback(_))
    }
}

/// Asks `selector` for a move and plays it, or plays a random legal move
/// if the selector fails.
///
/// Returns `None` without moving when the game is over, a promotion choice
/// is pending, or the side to move has no legal moves.
pub async fn play_external_turn<S, R>(
    game: &mut Game,
    selector: &S,
    rng: &mut R,
) -> Option<ExternalMove>
where
    S: MoveSelector,
    R: Rng + ?Sized,
{
    if game.is_game_over() || game.pending_promotion().is_some() {
        return None;
    }

    let board = game.position_string();
    let chosen = match selector.request_move(&board).await {
        Ok(response) => decode(game, &response),
        Err(e) => Err(e),
    };

    let external = match chosen {
        Ok(m) => ExternalMove::Selected(m),
        Err(e) => {
            warn!(error = %e, "external move failed, playing a random legal move");
            ExternalMove::Fallback(random_legal_move(game.position(), rng)?)
        }
    };

    match game.play(external.coord(), MoveOrigin::External) {
        Ok(_) => Some(external),
        Err(e) => {
            warn!(error = %e, mv = %external.coord(), "could not play external move");
            None
        }
    }
}

/// Decodes the selector's move and checks it is legal for the side to move.
fn decode(game: &Game, response: &MoveResponse) -> Result<CoordMove, MoverError> {
    let m = CoordMove::parse(&response.mv)
        .ok_or_else(|| MoverError::Undecodable(response.mv.clone()))?;
    if !game.all_legal_moves().contains(&m) {
        return Err(MoverError::Illegal(m));
    }

    info!(
        mv = %m,
        evaluation = ?response.evaluation,
        thinking_time = ?response.thinking_time,
        "external move"
    );
    Ok(m)
}
