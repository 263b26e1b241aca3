//! AI turns as plain values.
//!
//! The controller hands out an [`AiTurn`]; deciding it is synchronous and
//! free of shared state, so the caller may run it on a worker and wait as
//! long as it likes before handing the [`AiDecision`] back.

use crate::{AiEngine, AiError, Board, Player, Position};
use derive_getters::Getters;
use tracing::instrument;

/// A pending AI move on the active board.
#[derive(Debug, Clone, Getters)]
pub struct AiTurn {
    board_index: usize,
    board: Board,
    player: Player,
    #[getter(skip)]
    engine: AiEngine,
}

impl AiTurn {
    pub(crate) fn new(board_index: usize, board: Board, player: Player, engine: AiEngine) -> Self {
        Self {
            board_index,
            board,
            player,
            engine,
        }
    }

    /// Runs the AI engine on the captured board.
    #[instrument(skip(self), fields(board = self.board_index, player = %self.player))]
    pub fn decide(mut self) -> AiDecision {
        let choice = self.engine.choose_move(&self.board, self.player);
        AiDecision {
            board_index: self.board_index,
            player: self.player,
            choice,
        }
    }
}

/// The outcome of [`AiTurn::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiDecision {
    /// Board the decision was made for.
    pub board_index: usize,
    /// Symbol the AI plays.
    pub player: Player,
    /// Chosen cell, or the reason there is none.
    pub choice: Result<Position, AiError>,
}
