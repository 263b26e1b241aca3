//! Runs AI turns off the game task.

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use xo_engine::{AiDecision, AiTurn};

/// Decides AI turns on a blocking worker and paces them for display.
///
/// The delay only holds the decision back; it never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_new::new)]
pub struct AiScheduler {
    think_delay: Duration,
}

impl AiScheduler {
    /// A scheduler that applies decisions as soon as they are made.
    pub fn immediate() -> Self {
        Self::default()
    }

    /// Pause before a decision is handed back.
    pub fn think_delay(&self) -> Duration {
        self.think_delay
    }

    /// Decides `turn` and waits out the think delay.
    ///
    /// Returns the decision with the time spent computing it. The think
    /// delay is not part of that time.
    #[instrument(skip(self, turn), fields(board = *turn.board_index(), delay_ms = self.think_delay.as_millis() as u64))]
    pub async fn decide(&self, turn: AiTurn) -> Result<(AiDecision, Duration)> {
        let decision = tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let decision = turn.decide();
            (decision, started.elapsed())
        });
        let pause = tokio::time::sleep(self.think_delay);

        let (decision, ()) = tokio::join!(decision, pause);
        let (decision, thinking) = decision?;
        debug!(choice = ?decision.choice, thinking_us = thinking.as_micros() as u64, "AI decision ready");
        Ok((decision, thinking))
    }
}
