//! Per-player countdown with bonus and penalty time.
//!
//! The clock observes tournament events and never touches the tournament
//! itself. When a player's time runs out it reports
//! [`ClockEvent::Expired`]; ending the tournament is up to the caller
//! (see [`Arena`](crate::Arena)).

use super::{Outcome, Player, TournamentEvent};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default thinking budget per player.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(120);

/// Time granted to the winner of a board.
pub const WIN_BONUS: Duration = Duration::from_secs(5);

/// Time taken from the loser of a board.
pub const LOSS_PENALTY: Duration = Duration::from_secs(3);

/// Time taken from both players on a drawn board.
pub const DRAW_PENALTY: Duration = Duration::from_secs(1);

/// Timing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
pub struct ClockRules {
    /// Starting time per player.
    pub budget: Duration,
    /// Added to a board winner.
    pub win_bonus: Duration,
    /// Removed from a board loser.
    pub loss_penalty: Duration,
    /// Removed from both players on a draw.
    pub draw_penalty: Duration,
}

impl Default for ClockRules {
    fn default() -> Self {
        Self {
            budget: DEFAULT_TIME_BUDGET,
            win_bonus: WIN_BONUS,
            loss_penalty: LOSS_PENALTY,
            draw_penalty: DRAW_PENALTY,
        }
    }
}

/// A change to a player's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockEvent {
    /// Time was added.
    Bonus {
        /// Receiving player.
        player: Player,
        /// Time added.
        amount: Duration,
    },
    /// Time was removed.
    Penalty {
        /// Penalized player.
        player: Player,
        /// Time removed.
        amount: Duration,
    },
    /// The player has no time left.
    Expired(Player),
}

/// Countdown for both players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentClock {
    rules: ClockRules,
    remaining: [Duration; 2],
    expired: Option<Player>,
}

impl TournamentClock {
    /// Creates a clock with the full budget for both players.
    #[instrument]
    pub fn new(rules: ClockRules) -> Self {
        Self {
            rules,
            remaining: [rules.budget; 2],
            expired: None,
        }
    }

    /// Timing rules.
    pub fn rules(&self) -> &ClockRules {
        &self.rules
    }

    /// Time left for `player`.
    pub fn remaining(&self, player: Player) -> Duration {
        self.remaining[player.slot()]
    }

    /// The player whose time ran out, if any. The clock stops once set.
    pub fn expired(&self) -> Option<Player> {
        self.expired
    }

    /// Restores the full budget for both players.
    pub fn reset(&mut self) {
        self.remaining = [self.rules.budget; 2];
        self.expired = None;
    }

    /// Consumes `elapsed` thinking time from `player`.
    #[instrument(skip(self))]
    pub fn tick(&mut self, player: Player, elapsed: Duration) -> Option<ClockEvent> {
        if self.expired.is_some() {
            return None;
        }
        let mut events = Vec::new();
        self.deduct(player, elapsed, &mut events);
        events.into_iter().find(|e| matches!(e, ClockEvent::Expired(_)))
    }

    /// Applies bonus and penalty time for a tournament event.
    #[instrument(skip(self))]
    pub fn observe(&mut self, event: &TournamentEvent) -> Vec<ClockEvent> {
        let mut events = Vec::new();

        match event {
            TournamentEvent::TournamentReset => self.reset(),
            _ if self.expired.is_some() => {}
            TournamentEvent::BoardCompleted {
                outcome: Outcome::Winner(winner),
                ..
            } => {
                let winner = *winner;
                self.remaining[winner.slot()] += self.rules.win_bonus;
                events.push(ClockEvent::Bonus {
                    player: winner,
                    amount: self.rules.win_bonus,
                });
                events.push(ClockEvent::Penalty {
                    player: winner.opponent(),
                    amount: self.rules.loss_penalty,
                });
                self.deduct(winner.opponent(), self.rules.loss_penalty, &mut events);
            }
            TournamentEvent::BoardCompleted {
                outcome: Outcome::Draw,
                ..
            } => {
                for player in [Player::X, Player::O] {
                    if self.expired.is_some() {
                        break;
                    }
                    events.push(ClockEvent::Penalty {
                        player,
                        amount: self.rules.draw_penalty,
                    });
                    self.deduct(player, self.rules.draw_penalty, &mut events);
                }
            }
            TournamentEvent::MoveApplied(_) | TournamentEvent::TournamentOver { .. } => {}
        }

        if !events.is_empty() {
            debug!(
                x_remaining_ms = self.remaining(Player::X).as_millis() as u64,
                o_remaining_ms = self.remaining(Player::O).as_millis() as u64,
                "Clock adjusted"
            );
        }
        events
    }

    fn deduct(&mut self, player: Player, amount: Duration, events: &mut Vec<ClockEvent>) {
        let slot = &mut self.remaining[player.slot()];
        *slot = slot.saturating_sub(amount);
        if slot.is_zero() {
            info!(player = %player, "Clock expired");
            self.expired = Some(player);
            events.push(ClockEvent::Expired(player));
        }
    }
}

impl Default for TournamentClock {
    fn default() -> Self {
        Self::new(ClockRules::default())
    }
}
