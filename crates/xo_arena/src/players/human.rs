//! Human seat fed by lines of text.

use super::{Player, PlayerAction};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};
use xo_engine::{Position, TournamentSnapshot};

/// Human player reading commands from a line channel.
///
/// The receiver is shared so that both seats of a two-player game can read
/// from the same terminal.
pub struct HumanPlayer {
    name: String,
    input_rx: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(
        name: impl Into<String>,
        input_rx: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
    ) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }

    /// Parses one line of input.
    ///
    /// Accepts a cell number 1-9 or a cell label, `r` to reset and `q` to quit.
    pub fn parse_line(line: &str) -> Option<PlayerAction> {
        match line.trim().to_ascii_lowercase().as_str() {
            "q" | "quit" => Some(PlayerAction::Quit),
            "r" | "reset" => Some(PlayerAction::Reset),
            other => Position::parse_input(other).map(|pos| PlayerAction::Move(pos.to_index())),
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_action(&mut self, _snapshot: &TournamentSnapshot) -> Result<PlayerAction> {
        let mut input_rx = self.input_rx.lock().await;

        while let Some(line) = input_rx.recv().await {
            match Self::parse_line(&line) {
                Some(action) => return Ok(action),
                None => debug!(player = %self.name, input = %line.trim(), "Ignoring input"),
            }
        }

        info!(player = %self.name, "Input closed");
        Ok(PlayerAction::Quit)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
