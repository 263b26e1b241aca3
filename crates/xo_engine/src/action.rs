//! First-class move and error types.
//!
//! Moves are domain events, not side effects. A [`Move`] records who played
//! where, and every rejected move is reported as a [`MoveError`] without
//! touching game state.

use super::{Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in a tournament: a player placing their mark on one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Index of the board played on (0-7).
    pub board: usize,
    /// The cell where the mark is placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, board: usize, position: Position) -> Self {
        Self {
            player,
            board,
            position,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> board {} {}",
            self.player,
            self.board + 1,
            self.position.label()
        )
    }
}

/// Reasons a move is rejected.
///
/// All variants are recoverable: the caller may simply try another move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The tournament has already ended.
    #[display("Tournament is already over")]
    TournamentOver,

    /// The board index is outside the tournament.
    #[display("Board {} does not exist", _0)]
    BoardOutOfRange(usize),

    /// The move targets a board other than the active one.
    #[display("Board {} is not active (expected board {})", actual, expected)]
    WrongBoard {
        /// The active board.
        expected: usize,
        /// The board the move targeted.
        actual: usize,
    },

    /// The cell index is outside 0-8.
    #[display("Cell {} is out of range (must be 0-8)", _0)]
    CellOutOfRange(usize),

    /// The cell is already occupied.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// The board already has a winner or is full.
    #[display("Board is already finished")]
    BoardFinished,

    /// It is the AI's turn; human input is locked.
    #[display("Waiting for the AI to move")]
    AwaitingAi,

    /// An AI move was supplied when it is not the AI's turn.
    #[display("It is not the AI's turn")]
    NotAiTurn,

    /// An AI decision no longer matches the tournament state.
    #[display("AI decision for board {} is stale", _0)]
    StaleAiDecision(usize),
}

impl std::error::Error for MoveError {}
