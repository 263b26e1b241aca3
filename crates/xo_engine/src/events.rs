//! Events emitted by the tournament controller.
//!
//! Every accepted operation returns the events it produced, in order.
//! Observers (statistics, clock, front ends) consume them; none of them
//! can influence the game.

use super::{GameMode, Move, Outcome};
use serde::{Deserialize, Serialize};

/// Something that happened in a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentEvent {
    /// A mark was placed.
    MoveApplied(Move),
    /// A board was won or drawn and has been cleared.
    BoardCompleted {
        /// Index of the completed board.
        board: usize,
        /// How the board ended.
        outcome: Outcome,
    },
    /// The tournament ended.
    TournamentOver {
        /// Final result.
        outcome: Outcome,
        /// Mode the tournament was played in.
        mode: GameMode,
    },
    /// All boards and scores were cleared.
    TournamentReset,
}
