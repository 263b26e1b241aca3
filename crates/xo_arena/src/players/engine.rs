//! Seat driven by an AI engine.

use super::{Player, PlayerAction};
use anyhow::Result;
use std::time::Duration;
use tracing::debug;
use xo_engine::{AiEngine, TournamentSnapshot};

/// AI seat, used for engine-vs-engine play.
pub struct EnginePlayer {
    name: String,
    engine: AiEngine,
    delay: Duration,
}

impl EnginePlayer {
    /// Creates a new engine seat.
    pub fn new(name: impl Into<String>, engine: AiEngine, delay: Duration) -> Self {
        Self {
            name: name.into(),
            engine,
            delay,
        }
    }
}

#[async_trait::async_trait]
impl Player for EnginePlayer {
    async fn get_action(&mut self, snapshot: &TournamentSnapshot) -> Result<PlayerAction> {
        debug!(ai = %self.name, "AI making move");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let board = snapshot.active_board();
        let position = self.engine.choose_move(&board, snapshot.current_player)?;

        debug!(ai = %self.name, position = %position, "AI chose position");
        Ok(PlayerAction::Move(position.to_index()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
