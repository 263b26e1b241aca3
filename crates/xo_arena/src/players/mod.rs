//! Seats that produce moves for the orchestrator.

mod engine;
mod human;

pub use engine::EnginePlayer;
pub use human::HumanPlayer;

use anyhow::Result;
use xo_engine::TournamentSnapshot;

/// What a seat wants to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Play the cell (0-8) on the active board.
    Move(usize),
    /// Start the tournament over.
    Reset,
    /// Leave the session.
    Quit,
}

/// Trait for seats that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets this seat's action for the current turn.
    async fn get_action(&mut self, snapshot: &TournamentSnapshot) -> Result<PlayerAction>;

    /// Returns the seat's display name.
    fn name(&self) -> &str;
}
