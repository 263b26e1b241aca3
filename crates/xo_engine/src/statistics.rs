//! Per-player statistics derived from tournament events.
//!
//! [`Statistics`] is a pure observer: it is fed the events the controller
//! emits and never influences play. Resetting it is independent from
//! resetting the tournament.

use super::{CellCategory, ClockEvent, GameMode, Outcome, Player, TournamentEvent};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// A finished tournament from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerResult {
    /// The player won.
    Win,
    /// The player lost.
    Loss,
    /// Nobody won.
    Draw,
}

impl PlayerResult {
    /// Converts a tournament outcome to `player`'s result.
    pub fn for_player(outcome: Outcome, player: Player) -> Self {
        match outcome {
            Outcome::Winner(winner) if winner == player => Self::Win,
            Outcome::Winner(_) => Self::Loss,
            Outcome::Draw => Self::Draw,
        }
    }
}

/// Counters for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct PlayerStats {
    total_games: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    wins_vs_ai: u32,
    losses_vs_ai: u32,
    draws_vs_ai: u32,
    wins_vs_player: u32,
    losses_vs_player: u32,
    draws_vs_player: u32,
    total_moves: u32,
    center_moves: u32,
    corner_moves: u32,
    edge_moves: u32,
    timed_moves: u32,
    total_move_time: Duration,
    boards_won: u32,
    boards_drawn: u32,
    current_win_streak: u32,
    longest_win_streak: u32,
    comeback_wins: u32,
    bonus_count: u32,
    penalty_count: u32,
    bonus_time: Duration,
    penalty_time: Duration,
    last_result: Option<PlayerResult>,
}

impl PlayerStats {
    /// Win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }

    /// Mean thinking time over timed moves.
    pub fn average_move_time(&self) -> Option<Duration> {
        (self.timed_moves > 0).then(|| self.total_move_time / self.timed_moves)
    }

    /// Moves played into cells of `category`.
    pub fn moves_in(&self, category: CellCategory) -> u32 {
        match category {
            CellCategory::Center => self.center_moves,
            CellCategory::Corner => self.corner_moves,
            CellCategory::Edge => self.edge_moves,
        }
    }

    fn record_move(&mut self, category: CellCategory) {
        self.total_moves += 1;
        match category {
            CellCategory::Center => self.center_moves += 1,
            CellCategory::Corner => self.corner_moves += 1,
            CellCategory::Edge => self.edge_moves += 1,
        }
    }

    fn record_result(&mut self, result: PlayerResult, mode: GameMode) {
        self.total_games += 1;
        let vs_ai = mode == GameMode::AiOpponent;

        match result {
            PlayerResult::Win => {
                self.wins += 1;
                if vs_ai {
                    self.wins_vs_ai += 1;
                } else {
                    self.wins_vs_player += 1;
                }
                self.current_win_streak += 1;
                self.longest_win_streak = self.longest_win_streak.max(self.current_win_streak);
                if self.last_result == Some(PlayerResult::Loss) {
                    self.comeback_wins += 1;
                }
            }
            PlayerResult::Loss => {
                self.losses += 1;
                if vs_ai {
                    self.losses_vs_ai += 1;
                } else {
                    self.losses_vs_player += 1;
                }
                self.current_win_streak = 0;
            }
            PlayerResult::Draw => {
                self.draws += 1;
                if vs_ai {
                    self.draws_vs_ai += 1;
                } else {
                    self.draws_vs_player += 1;
                }
                self.current_win_streak = 0;
            }
        }

        self.last_result = Some(result);
    }
}

/// Statistics for both symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    x: PlayerStats,
    o: PlayerStats,
}

impl Statistics {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for `player`.
    pub fn player(&self, player: Player) -> &PlayerStats {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    fn player_mut(&mut self, player: Player) -> &mut PlayerStats {
        match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }

    /// Updates counters from a tournament event.
    #[instrument(skip(self))]
    pub fn observe(&mut self, event: &TournamentEvent) {
        match *event {
            TournamentEvent::MoveApplied(action) => {
                self.player_mut(action.player)
                    .record_move(action.position.category());
            }
            TournamentEvent::BoardCompleted {
                outcome: Outcome::Winner(winner),
                ..
            } => {
                self.player_mut(winner).boards_won += 1;
            }
            TournamentEvent::BoardCompleted {
                outcome: Outcome::Draw,
                ..
            } => {
                self.x.boards_drawn += 1;
                self.o.boards_drawn += 1;
            }
            TournamentEvent::TournamentOver { outcome, mode } => {
                for player in [Player::X, Player::O] {
                    let result = PlayerResult::for_player(outcome, player);
                    self.player_mut(player).record_result(result, mode);
                    debug!(player = %player, ?result, "Result recorded");
                }
            }
            TournamentEvent::TournamentReset => {}
        }
    }

    /// Updates bonus and penalty counters from a clock event.
    #[instrument(skip(self))]
    pub fn observe_clock(&mut self, event: &ClockEvent) {
        match *event {
            ClockEvent::Bonus { player, amount } => {
                let stats = self.player_mut(player);
                stats.bonus_count += 1;
                stats.bonus_time += amount;
            }
            ClockEvent::Penalty { player, amount } => {
                let stats = self.player_mut(player);
                stats.penalty_count += 1;
                stats.penalty_time += amount;
            }
            ClockEvent::Expired(_) => {}
        }
    }

    /// Adds one timed move for `player`.
    #[instrument(skip(self))]
    pub fn record_move_time(&mut self, player: Player, elapsed: Duration) {
        let stats = self.player_mut(player);
        stats.timed_moves += 1;
        stats.total_move_time += elapsed;
    }

    /// Clears all counters. Does not touch any tournament.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::default();
        debug!("Statistics reset");
    }
}
