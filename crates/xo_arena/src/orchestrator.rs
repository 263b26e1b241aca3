//! Tournament orchestration between seats.

use crate::players::{Player, PlayerAction};
use crate::scheduler::AiScheduler;
use anyhow::{Context, Result, anyhow};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};
use xo_engine::{
    Arena, ArenaEvent, ClockEvent, Move, MoveError, Outcome, Player as Mark, TournamentEvent,
    TournamentSnapshot,
};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Tournament state updated.
    StateChanged(TournamentSnapshot),
    /// The AI is deciding its move.
    AiThinking {
        /// Board being played.
        board: usize,
        /// Symbol the AI plays.
        mark: Mark,
    },
    /// A move was applied.
    MoveMade(Move),
    /// A board was won or drawn and cleared.
    BoardCompleted {
        /// Completed board.
        board: usize,
        /// How it ended.
        outcome: Outcome,
    },
    /// A move was refused.
    Rejected {
        /// Seat whose move was refused.
        mark: Mark,
        /// Why.
        error: MoveError,
    },
    /// A clock changed.
    Clock(ClockEvent),
    /// The tournament was started over.
    Reset,
    /// The tournament ended.
    TournamentOver(Outcome),
}

/// Orchestrates a tournament between seats and the built-in AI.
///
/// Seats without a [`Player`] must belong to the tournament's AI; their
/// turns go through the [`AiScheduler`].
pub struct Orchestrator {
    arena: Arena,
    player_x: Option<Box<dyn Player>>,
    player_o: Option<Box<dyn Player>>,
    scheduler: AiScheduler,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator with empty seats.
    pub fn new(
        arena: Arena,
        scheduler: AiScheduler,
        event_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            arena,
            player_x: None,
            player_o: None,
            scheduler,
            event_tx,
        }
    }

    /// Seats `player` as `mark`.
    pub fn with_seat(mut self, mark: Mark, player: Box<dyn Player>) -> Self {
        match mark {
            Mark::X => self.player_x = Some(player),
            Mark::O => self.player_o = Some(player),
        }
        self
    }

    /// The arena being played.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Consumes the orchestrator, returning the arena.
    pub fn into_arena(self) -> Arena {
        self.arena
    }

    /// Runs the tournament until it ends or a seat quits.
    ///
    /// Returns the outcome, or `None` if a seat quit first.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<Option<Outcome>> {
        info!("Starting tournament orchestration");

        loop {
            let snapshot = self.arena.snapshot();
            self.emit(SessionEvent::StateChanged(snapshot.clone()))?;

            if let Some(outcome) = snapshot.winner {
                info!(outcome = %outcome, score = %snapshot.total_score, "Tournament finished");
                self.emit(SessionEvent::TournamentOver(outcome))?;
                return Ok(Some(outcome));
            }

            let mark = snapshot.current_player;

            if self.arena.tournament().is_ai_turn() {
                self.play_ai_turn(mark).await?;
                continue;
            }

            let started = Instant::now();
            let remaining = self.arena.clock().map(|clock| clock.remaining(mark));
            let seat = self.seat_mut(mark)?;
            let name = seat.name().to_string();
            let pending = seat.get_action(&snapshot);

            // A seat on the clock loses as soon as its time is up
            let action = match remaining {
                Some(remaining) => tokio::time::timeout(remaining, pending).await.ok(),
                None => Some(pending.await),
            };
            let Some(action) = action else {
                info!(player = %name, "Seat ran out of time");
                let remaining = remaining.unwrap_or_default();
                self.charge_clock(mark, started.elapsed().max(remaining))?;
                continue;
            };
            let action = action.with_context(|| format!("{} failed to choose a move", name))?;

            match action {
                PlayerAction::Quit => {
                    info!(player = %name, "Seat quit");
                    return Ok(None);
                }
                PlayerAction::Reset => {
                    let events = self.arena.reset_tournament();
                    self.publish(events)?;
                }
                PlayerAction::Move(cell) => {
                    if self.charge_clock(mark, started.elapsed())? {
                        continue;
                    }
                    match self.arena.apply_move(snapshot.current_board, cell) {
                        Ok(events) => {
                            self.arena.record_move_time(mark, started.elapsed());
                            self.publish(events)?;
                        }
                        Err(error) => {
                            debug!(player = %name, %error, "Move rejected");
                            self.emit(SessionEvent::Rejected { mark, error })?;
                        }
                    }
                }
            }
        }
    }

    /// Plays the built-in AI's turn. Only the search time is charged; the
    /// think delay is pacing.
    async fn play_ai_turn(&mut self, mark: Mark) -> Result<()> {
        let turn = self.arena.begin_ai_turn()?;
        self.emit(SessionEvent::AiThinking {
            board: *turn.board_index(),
            mark,
        })?;

        let (decision, thinking) = self.scheduler.decide(turn).await?;
        if self.charge_clock(mark, thinking)? {
            return Ok(());
        }

        match self.arena.finish_ai_turn(decision) {
            Ok(events) => {
                self.arena.record_move_time(mark, thinking);
                self.publish(events)
            }
            Err(error) => {
                warn!(%error, "AI decision discarded");
                Ok(())
            }
        }
    }

    /// Charges thinking time; returns true if the tournament ended on time.
    fn charge_clock(&mut self, mark: Mark, elapsed: Duration) -> Result<bool> {
        let events = self.arena.tick_clock(mark, elapsed);
        self.publish(events)?;
        Ok(self.arena.tournament().is_over())
    }

    fn seat_mut(&mut self, mark: Mark) -> Result<&mut Box<dyn Player>> {
        let seat = match mark {
            Mark::X => self.player_x.as_mut(),
            Mark::O => self.player_o.as_mut(),
        };
        seat.ok_or_else(|| anyhow!("No seat for player {}", mark))
    }

    fn publish(&self, events: Vec<ArenaEvent>) -> Result<()> {
        for event in events {
            let message = match event {
                ArenaEvent::Tournament(TournamentEvent::MoveApplied(action)) => {
                    SessionEvent::MoveMade(action)
                }
                ArenaEvent::Tournament(TournamentEvent::BoardCompleted { board, outcome }) => {
                    SessionEvent::BoardCompleted { board, outcome }
                }
                ArenaEvent::Tournament(TournamentEvent::TournamentReset) => SessionEvent::Reset,
                // Reported once the loop sees the final snapshot
                ArenaEvent::Tournament(TournamentEvent::TournamentOver { .. }) => continue,
                ArenaEvent::Clock(clock) => SessionEvent::Clock(clock),
            };
            self.emit(message)?;
        }
        Ok(())
    }

    fn emit(&self, event: SessionEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .map_err(|_| anyhow!("Session event receiver dropped"))
    }
}
