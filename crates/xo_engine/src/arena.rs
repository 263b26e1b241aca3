//! The engine's boundary: one tournament plus its observers.

use super::{
    AiDecision, AiTurn, ClockEvent, ClockRules, Difficulty, GameMode, MoveError, Player,
    Statistics, Tournament, TournamentClock, TournamentConfig, TournamentEvent,
    TournamentSnapshot,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Anything an [`Arena`] operation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaEvent {
    /// Emitted by the tournament.
    Tournament(TournamentEvent),
    /// Emitted by the clock.
    Clock(ClockEvent),
}

/// A tournament wired to its statistics and optional clock.
///
/// Every operation forwards the events it causes to [`Statistics`] and the
/// [`TournamentClock`], and returns them. A clock expiry ends the
/// tournament in favour of the other player.
#[derive(Debug, Clone)]
pub struct Arena {
    tournament: Tournament,
    statistics: Statistics,
    clock: Option<TournamentClock>,
}

impl Arena {
    /// Creates an arena with fresh statistics and no clock.
    #[instrument]
    pub fn new(config: TournamentConfig) -> Self {
        Self::with_tournament(Tournament::new(config))
    }

    /// Wraps an existing tournament.
    pub fn with_tournament(tournament: Tournament) -> Self {
        Self {
            tournament,
            statistics: Statistics::new(),
            clock: None,
        }
    }

    /// Enables the countdown clock.
    pub fn with_clock(mut self, rules: ClockRules) -> Self {
        self.clock = Some(TournamentClock::new(rules));
        self
    }

    /// Replaces the statistics record, e.g. with one loaded from disk.
    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = statistics;
        self
    }

    /// The tournament.
    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    /// Accumulated statistics.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// The clock, if enabled.
    pub fn clock(&self) -> Option<&TournamentClock> {
        self.clock.as_ref()
    }

    /// Serializable view of the tournament.
    pub fn snapshot(&self) -> TournamentSnapshot {
        self.tournament.snapshot()
    }

    /// Starts a fresh tournament with a new mode and difficulty.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, mode: GameMode, difficulty: Difficulty) -> Vec<ArenaEvent> {
        let events = self.tournament.new_game(mode, difficulty);
        self.dispatch(events)
    }

    /// Applies a human move.
    ///
    /// # Errors
    ///
    /// See [`Tournament::apply_move`].
    #[instrument(skip(self))]
    pub fn apply_move(
        &mut self,
        board_index: usize,
        cell_index: usize,
    ) -> Result<Vec<ArenaEvent>, MoveError> {
        let events = self.tournament.apply_move(board_index, cell_index)?;
        Ok(self.dispatch(events))
    }

    /// Decides and applies the AI's move immediately.
    ///
    /// # Errors
    ///
    /// See [`Tournament::ai_move`].
    #[instrument(skip(self))]
    pub fn ai_move(&mut self) -> Result<Vec<ArenaEvent>, MoveError> {
        let events = self.tournament.ai_move()?;
        Ok(self.dispatch(events))
    }

    /// Hands out the AI's pending turn.
    ///
    /// # Errors
    ///
    /// See [`Tournament::begin_ai_turn`].
    pub fn begin_ai_turn(&mut self) -> Result<AiTurn, MoveError> {
        self.tournament.begin_ai_turn()
    }

    /// Applies a decided AI turn.
    ///
    /// # Errors
    ///
    /// See [`Tournament::finish_ai_turn`].
    #[instrument(skip(self))]
    pub fn finish_ai_turn(&mut self, decision: AiDecision) -> Result<Vec<ArenaEvent>, MoveError> {
        let events = self.tournament.finish_ai_turn(decision)?;
        Ok(self.dispatch(events))
    }

    /// Clears the tournament. Statistics are kept.
    #[instrument(skip(self))]
    pub fn reset_tournament(&mut self) -> Vec<ArenaEvent> {
        let events = self.tournament.reset();
        self.dispatch(events)
    }

    /// Clears statistics. The tournament is kept.
    #[instrument(skip(self))]
    pub fn reset_statistics(&mut self) {
        self.statistics.reset();
    }

    /// Switches mode and starts a fresh tournament.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) -> Vec<ArenaEvent> {
        let events = self.tournament.set_mode(mode);
        self.dispatch(events)
    }

    /// Records how long `player` took for a move.
    pub fn record_move_time(&mut self, player: Player, elapsed: Duration) {
        self.statistics.record_move_time(player, elapsed);
    }

    /// Charges `elapsed` to `player`'s clock.
    ///
    /// Does nothing without a clock or after the tournament ended.
    #[instrument(skip(self))]
    pub fn tick_clock(&mut self, player: Player, elapsed: Duration) -> Vec<ArenaEvent> {
        if self.tournament.is_over() {
            return Vec::new();
        }
        let Some(event) = self.clock.as_mut().and_then(|c| c.tick(player, elapsed)) else {
            return Vec::new();
        };

        self.statistics.observe_clock(&event);
        let mut out = vec![ArenaEvent::Clock(event)];
        if let ClockEvent::Expired(expired) = event {
            out.extend(self.expire(expired));
        }
        out
    }

    fn expire(&mut self, expired: Player) -> Vec<ArenaEvent> {
        match self.tournament.end_on_time(expired) {
            Ok(events) => self.dispatch(events),
            Err(e) => {
                debug!(error = %e, "Clock expired after tournament end");
                Vec::new()
            }
        }
    }

    /// Feeds tournament events to the observers.
    fn dispatch(&mut self, events: Vec<TournamentEvent>) -> Vec<ArenaEvent> {
        let mut out = Vec::with_capacity(events.len());
        let mut expired = None;

        for event in events {
            self.statistics.observe(&event);
            out.push(ArenaEvent::Tournament(event));

            if let Some(clock) = self.clock.as_mut() {
                for clock_event in clock.observe(&event) {
                    self.statistics.observe_clock(&clock_event);
                    if let ClockEvent::Expired(player) = clock_event {
                        expired = Some(player);
                    }
                    out.push(ArenaEvent::Clock(clock_event));
                }
            }
        }

        if let Some(player) = expired {
            if !self.tournament.is_over() {
                out.extend(self.expire(player));
            }
        }
        out
    }
}
