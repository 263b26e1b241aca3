//! AI opponents.
//!
//! Three tiers share one entry point, [`AiEngine::choose_move`]:
//!
//! - **Easy** picks a uniformly random empty cell ([`random_move`]).
//! - **Medium** wins if it can, blocks if it must, else plays randomly
//!   ([`heuristic_move`]). Among several winning or blocking cells the lowest
//!   index is taken.
//! - **Hard** runs a full minimax search with alpha-beta pruning
//!   ([`best_move`]).

mod easy;
mod medium;
mod minimax;

pub use easy::random_move;
pub use medium::heuristic_move;
pub use minimax::{SearchReport, WIN_SCORE, best_move};

use crate::{Board, Player, Position};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// AI strength.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random play.
    Easy,
    /// One-ply win/block heuristic.
    #[default]
    Medium,
    /// Perfect play.
    Hard,
}

/// The AI was asked to move on a board with no legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AiError {
    /// The board is full or already finished.
    #[display("No legal move available")]
    NoMoves,
}

impl std::error::Error for AiError {}

/// Move selector for one difficulty tier.
///
/// Owns its random number generator so that Easy and Medium are
/// reproducible when built with [`AiEngine::seeded`].
#[derive(Debug, Clone)]
pub struct AiEngine {
    difficulty: Difficulty,
    rng: StdRng,
}

impl AiEngine {
    /// Creates an engine seeded from the operating system.
    #[instrument]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an engine with a fixed seed.
    #[instrument]
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the difficulty tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the difficulty tier.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Splits off an independent engine with the same tier.
    ///
    /// The child is seeded from this engine's stream, so a seeded parent
    /// produces a reproducible sequence of children.
    pub fn fork(&mut self) -> Self {
        Self {
            difficulty: self.difficulty,
            rng: StdRng::seed_from_u64(self.rng.next_u64()),
        }
    }

    /// Chooses a cell for `player` on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NoMoves`] if the board is full or finished.
    #[instrument(skip(self, board), fields(difficulty = %self.difficulty))]
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Result<Position, AiError> {
        if board.is_finished() {
            return Err(AiError::NoMoves);
        }

        let choice = match self.difficulty {
            Difficulty::Easy => random_move(board, &mut self.rng),
            Difficulty::Medium => heuristic_move(board, player, &mut self.rng),
            Difficulty::Hard => best_move(board, player).map(|report| report.position),
        };

        let position = choice.ok_or(AiError::NoMoves)?;
        debug!(position = %position, "AI chose position");
        Ok(position)
    }
}
