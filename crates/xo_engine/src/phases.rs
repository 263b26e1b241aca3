//! Result and lifecycle phase types shared by boards and tournaments.

use serde::{Deserialize, Serialize};

/// Outcome of a finished board or tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won.
    Winner(super::Player),
    /// Nobody won.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<super::Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if this was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Lifecycle phase of a tournament.
///
/// A board that has just been completed is reported through
/// [`TournamentEvent::BoardCompleted`](crate::TournamentEvent::BoardCompleted)
/// and folds straight back into `InProgress`, so it has no phase of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TournamentStatus {
    /// Moves are accepted.
    #[default]
    InProgress,
    /// The tournament ended; only a reset is accepted.
    Over(Outcome),
}

impl TournamentStatus {
    /// Returns true once the tournament has ended.
    pub fn is_over(&self) -> bool {
        matches!(self, TournamentStatus::Over(_))
    }

    /// Returns the final outcome, if the tournament has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            TournamentStatus::InProgress => None,
            TournamentStatus::Over(outcome) => Some(*outcome),
        }
    }
}
