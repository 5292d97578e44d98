//! Game management: turn flow, promotion, history and capture tracking.
//!
//! The [`Game`] struct owns the current position and everything a front end
//! needs around it:
//! - Move history with notation
//! - Captured pieces per color
//! - The square selection used by click-driven input
//! - A two-step promotion flow for human moves
//! - Board orientation

use crate::movegen::{all_legal_moves, legal_moves};
use crate::notation::move_notation;
use crate::rules::{CasualChess, GameStatus, RuleSet};
use crate::{Position, PositionError, TargetList};
use chess_core::{Color, ColoredPiece, CoordMove, Piece, Square};
use thiserror::Error;
use tracing::{debug, info};

/// Who proposed a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrigin {
    /// A local player. Pawn promotions wait for a piece choice.
    Human,
    /// An external move selector. A pawn reaching the last row is applied
    /// as it is and stays a pawn.
    External,
}

/// A recorded move in game history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The piece that moved, as it stood before the move.
    pub piece: ColoredPiece,
    pub captured: Option<ColoredPiece>,
    /// The piece a pawn became, if the move was a promotion.
    pub promotion: Option<Piece>,
    /// Notation for the move list.
    pub notation: String,
}

impl MoveRecord {
    /// Returns the move as a coordinate move.
    #[inline]
    pub fn coord(&self) -> CoordMove {
        CoordMove::new(self.from, self.to)
    }
}

/// A pawn move to the last row waiting for the piece choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub pawn: ColoredPiece,
    pub captured: Option<ColoredPiece>,
}

/// Whether the game is accepting moves or waiting on a promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingPromotion(PendingPromotion),
}

/// Result of a proposed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was played; the status is for the side now to move.
    Applied(GameStatus),
    /// The move reaches the last row and needs
    /// [`complete_promotion`](Game::complete_promotion).
    PromotionRequired(PendingPromotion),
}

/// Result of clicking a square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored,
    /// A piece was selected; `targets` are its legal destinations.
    Selected { square: Square, targets: TargetList },
    /// The previous selection was dropped.
    Deselected,
    /// The selected piece moved to the clicked square.
    Moved(GameStatus),
    /// The selected pawn moved to the last row and needs a piece choice.
    PromotionRequired(PendingPromotion),
}

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game has already ended")]
    GameOver,

    #[error("a promotion choice is pending")]
    PromotionPending,

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error("cannot promote to {0}")]
    InvalidPromotion(Piece),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("piece on {0} does not belong to the side to move")]
    NotYourPiece(Square),

    #[error("illegal move: {0}")]
    IllegalMove(CoordMove),
}

/// A chess game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: Vec<MoveRecord>,
    /// Captured pieces, indexed by the color of the captured piece.
    captured: [Vec<Piece>; 2],
    status: GameStatus,
    phase: Phase,
    /// The color a local player controls; `None` lets one player move both sides.
    player_color: Option<Color>,
    selection: Option<(Square, TargetList)>,
    flipped: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(CasualChess.initial_position())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        let status = CasualChess.evaluate(&position);
        Game {
            position,
            history: Vec::new(),
            captured: [Vec::new(), Vec::new()],
            status,
            phase: Phase::Idle,
            player_color: None,
            selection: None,
            flipped: false,
        }
    }

    /// Creates a game from a position string.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Resets to the starting position with the player on `player_color`.
    ///
    /// Board orientation is left as it was.
    pub fn new_game(&mut self, player_color: Option<Color>) {
        let flipped = self.flipped;
        *self = Self::new();
        self.player_color = player_color;
        self.flipped = flipped;
        info!(?player_color, "new game");
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the current position string.
    pub fn position_string(&self) -> String {
        self.position.to_fen()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        CasualChess.is_check(&self.position)
    }

    #[inline]
    pub fn player_color(&self) -> Option<Color> {
        self.player_color
    }

    /// Sets the color a local player controls without resetting the game.
    pub fn set_player_color(&mut self, player_color: Option<Color>) {
        self.player_color = player_color;
        self.selection = None;
    }

    /// Returns true if the side to move is played locally.
    pub fn is_human_turn(&self) -> bool {
        self.player_color
            .map_or(true, |color| color == self.side_to_move())
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Returns the pieces of `color` that have been captured, in order.
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_promotion(&self) -> Option<&PendingPromotion> {
        match &self.phase {
            Phase::AwaitingPromotion(pending) => Some(pending),
            Phase::Idle => None,
        }
    }

    /// Returns the selected square, if any.
    pub fn selection(&self) -> Option<Square> {
        self.selection.as_ref().map(|(sq, _)| *sq)
    }

    /// Returns the legal destinations of the selected piece.
    pub fn selected_targets(&self) -> &[Square] {
        match &self.selection {
            Some((_, targets)) => targets.as_slice(),
            None => &[],
        }
    }

    pub fn flip_orientation(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Turns the board so `color` sits at the bottom.
    pub fn face(&mut self, color: Color) {
        self.flipped = color == Color::Black;
    }

    #[inline]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Draws the board in the current orientation.
    pub fn render(&self) -> String {
        self.position.board().render(self.flipped)
    }

    /// Returns the legal destinations for the piece on `from`.
    pub fn legal_moves(&self, from: Square) -> TargetList {
        CasualChess.legal_moves(&self.position, from)
    }

    /// Returns every legal move for the side to move.
    pub fn all_legal_moves(&self) -> Vec<CoordMove> {
        all_legal_moves(&self.position)
    }

    /// Selects a piece of the side to move and returns its destinations.
    pub fn select(&mut self, square: Square) -> Result<TargetList, GameError> {
        self.check_accepting_moves()?;
        self.check_owned(square)?;
        let targets = legal_moves(&self.position, square);
        self.selection = Some((square, targets.clone()));
        Ok(targets)
    }

    /// Handles a click on `square`.
    ///
    /// With a piece selected, clicking one of its destinations moves it,
    /// clicking another own piece selects that instead, and clicking
    /// anything else clears the selection. Clicks are ignored when it is
    /// not the local player's turn.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if self.check_accepting_moves().is_err() || !self.is_human_turn() {
            return ClickOutcome::Ignored;
        }

        if let Some((from, targets)) = self.selection.clone() {
            if targets.contains(square) {
                return match self.propose_move(from, square, MoveOrigin::Human) {
                    Ok(MoveOutcome::Applied(status)) => ClickOutcome::Moved(status),
                    Ok(MoveOutcome::PromotionRequired(pending)) => {
                        ClickOutcome::PromotionRequired(pending)
                    }
                    Err(_) => ClickOutcome::Ignored,
                };
            }
            return match self.select(square) {
                Ok(targets) => ClickOutcome::Selected { square, targets },
                Err(_) => {
                    self.selection = None;
                    ClickOutcome::Deselected
                }
            };
        }

        match self.select(square) {
            Ok(targets) => ClickOutcome::Selected { square, targets },
            Err(_) => ClickOutcome::Ignored,
        }
    }

    /// Plays a coordinate move.
    pub fn play(&mut self, m: CoordMove, origin: MoveOrigin) -> Result<MoveOutcome, GameError> {
        self.propose_move(m.from, m.to, origin)
    }

    /// Proposes moving the piece on `from` to `to`.
    ///
    /// A human pawn move to the last row leaves the board untouched and
    /// returns [`MoveOutcome::PromotionRequired`]. An external one is applied
    /// without promoting.
    pub fn propose_move(
        &mut self,
        from: Square,
        to: Square,
        origin: MoveOrigin,
    ) -> Result<MoveOutcome, GameError> {
        self.check_accepting_moves()?;
        let mover = self.check_owned(from)?;

        if !legal_moves(&self.position, from).contains(to) {
            return Err(GameError::IllegalMove(CoordMove::new(from, to)));
        }

        let promotes = mover.piece == Piece::Pawn && to.row() == mover.color.promotion_row();
        if !promotes {
            return Ok(MoveOutcome::Applied(self.commit(from, to, mover, None)));
        }

        match origin {
            MoveOrigin::External => Ok(MoveOutcome::Applied(self.commit(from, to, mover, None))),
            MoveOrigin::Human => {
                let pending = PendingPromotion {
                    from,
                    to,
                    pawn: mover,
                    captured: self.position.piece_at(to),
                };
                self.phase = Phase::AwaitingPromotion(pending);
                self.selection = None;
                debug!(%from, %to, "awaiting promotion choice");
                Ok(MoveOutcome::PromotionRequired(pending))
            }
        }
    }

    /// Finishes a pending promotion with the chosen piece.
    pub fn complete_promotion(&mut self, kind: Piece) -> Result<GameStatus, GameError> {
        let Phase::AwaitingPromotion(pending) = self.phase else {
            return Err(GameError::NoPendingPromotion);
        };
        if !kind.is_promotion_target() {
            return Err(GameError::InvalidPromotion(kind));
        }
        Ok(self.commit(pending.from, pending.to, pending.pawn, Some(kind)))
    }

    /// Drops a pending promotion without moving.
    pub fn cancel_promotion(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::AwaitingPromotion(_) => {
                self.phase = Phase::Idle;
                Ok(())
            }
            Phase::Idle => Err(GameError::NoPendingPromotion),
        }
    }

    fn check_accepting_moves(&self) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if matches!(self.phase, Phase::AwaitingPromotion(_)) {
            return Err(GameError::PromotionPending);
        }
        Ok(())
    }

    fn check_owned(&self, square: Square) -> Result<ColoredPiece, GameError> {
        let piece = self
            .position
            .piece_at(square)
            .ok_or(GameError::EmptySquare(square))?;
        if piece.color != self.side_to_move() {
            return Err(GameError::NotYourPiece(square));
        }
        Ok(piece)
    }

    /// Applies a legal move and evaluates the resulting position.
    fn commit(
        &mut self,
        from: Square,
        to: Square,
        mover: ColoredPiece,
        promotion: Option<Piece>,
    ) -> GameStatus {
        let captured = self.position.piece_at(to);
        debug_assert!(
            captured.map_or(true, |p| p.piece != Piece::King),
            "king captured on {}",
            to
        );

        let notation = move_notation(mover.piece, from, to, captured.is_some(), promotion);

        self.position.relocate(from, to);
        if let Some(kind) = promotion {
            self.position.promote(to, ColoredPiece::new(kind, mover.color));
        }
        if let Some(taken) = captured {
            self.captured[taken.color.index()].push(taken.piece);
        }

        debug!(%from, %to, %notation, "move applied");
        self.history.push(MoveRecord {
            from,
            to,
            piece: mover,
            captured,
            promotion,
            notation,
        });

        self.position.pass_turn();
        self.selection = None;
        self.phase = Phase::Idle;
        self.status = CasualChess.evaluate(&self.position);

        if self.status.is_over() {
            info!(status = %self.status, plies = self.history.len(), "game over");
        }
        self.status
    }
}
