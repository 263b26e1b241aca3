//! The tournament state machine.

use super::ai_turn::{AiDecision, AiTurn};
use super::config::{BOARD_COUNT, GameMode, TournamentConfig};
use crate::{
    AiEngine, AiError, Board, Difficulty, Move, MoveError, Outcome, Player, Score,
    TournamentEvent, TournamentSnapshot, TournamentStatus,
};
use tracing::{debug, info, instrument, warn};

/// Eight boards played in rotation, first to the win threshold.
///
/// The tournament is the only way game state changes. Human moves go
/// through [`Tournament::apply_move`]; AI moves are handed out with
/// [`Tournament::begin_ai_turn`] and come back through
/// [`Tournament::finish_ai_turn`], which runs the same validation and
/// scoring path.
#[derive(Debug, Clone)]
pub struct Tournament {
    boards: [Board; BOARD_COUNT],
    current_board: usize,
    current_player: Player,
    board_scores: [Score; BOARD_COUNT],
    total_score: Score,
    status: TournamentStatus,
    config: TournamentConfig,
    engine: AiEngine,
    ai_thinking: bool,
    history: Vec<Move>,
}

impl Tournament {
    /// Creates a tournament with an entropy-seeded AI.
    #[instrument]
    pub fn new(config: TournamentConfig) -> Self {
        Self::with_engine(config, AiEngine::new(config.difficulty))
    }

    /// Creates a tournament using the given AI engine.
    ///
    /// The engine's difficulty is overridden by `config.difficulty`.
    #[instrument(skip(engine))]
    pub fn with_engine(config: TournamentConfig, mut engine: AiEngine) -> Self {
        engine.set_difficulty(config.difficulty);
        info!(mode = %config.mode, difficulty = %config.difficulty, "Creating tournament");
        Self {
            boards: Default::default(),
            current_board: 0,
            current_player: Player::X,
            board_scores: [Score::default(); BOARD_COUNT],
            total_score: Score::default(),
            status: TournamentStatus::InProgress,
            config,
            engine,
            ai_thinking: false,
            history: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Observed state
    // ─────────────────────────────────────────────────────────────

    /// All boards.
    pub fn boards(&self) -> &[Board; BOARD_COUNT] {
        &self.boards
    }

    /// The board at `index`, if it exists.
    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    /// Index of the board the next move must be played on.
    pub fn current_board(&self) -> usize {
        self.current_board
    }

    /// Player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Boards won on each board slot.
    pub fn board_scores(&self) -> &[Score; BOARD_COUNT] {
        &self.board_scores
    }

    /// Boards won overall.
    pub fn total_score(&self) -> Score {
        self.total_score
    }

    /// Lifecycle phase.
    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    /// True once the tournament has ended.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Final result, once over.
    pub fn winner(&self) -> Option<Outcome> {
        self.status.outcome()
    }

    /// Active configuration.
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// True while an AI turn is handed out and not yet applied.
    pub fn is_ai_thinking(&self) -> bool {
        self.ai_thinking
    }

    /// Moves applied since the last reset.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True when the next move belongs to the AI.
    pub fn is_ai_turn(&self) -> bool {
        !self.is_over() && self.config.ai_player() == Some(self.current_player)
    }

    /// Serializable view of the whole tournament.
    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            boards: std::array::from_fn(|i| *self.boards[i].cells()),
            current_board: self.current_board,
            current_player: self.current_player,
            total_score: self.total_score,
            board_scores: self.board_scores,
            game_over: self.is_over(),
            winner: self.winner(),
            ai_thinking: self.ai_thinking,
            mode: self.config.mode,
            win_threshold: self.config.win_threshold,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Applies a human move for the current player.
    ///
    /// # Errors
    ///
    /// Rejects without changing anything if the tournament is over, the
    /// board is not the active one, the cell is out of range or occupied,
    /// or it is the AI's turn ([`MoveError::AwaitingAi`]).
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(
        &mut self,
        board_index: usize,
        cell_index: usize,
    ) -> Result<Vec<TournamentEvent>, MoveError> {
        if self.is_over() {
            return Err(MoveError::TournamentOver);
        }
        if self.is_ai_turn() {
            debug!("Human move rejected during AI turn");
            return Err(MoveError::AwaitingAi);
        }
        self.apply(board_index, cell_index)
    }

    /// Hands out the AI's move on the active board.
    ///
    /// # Errors
    ///
    /// - [`MoveError::TournamentOver`] once the tournament has ended
    /// - [`MoveError::NotAiTurn`] if the current player is not the AI
    /// - [`MoveError::AwaitingAi`] if a turn is already handed out
    #[instrument(skip(self))]
    pub fn begin_ai_turn(&mut self) -> Result<AiTurn, MoveError> {
        if self.is_over() {
            return Err(MoveError::TournamentOver);
        }
        if !self.is_ai_turn() {
            return Err(MoveError::NotAiTurn);
        }
        if self.ai_thinking {
            return Err(MoveError::AwaitingAi);
        }

        self.ai_thinking = true;
        debug!(board = self.current_board, "AI turn started");
        Ok(AiTurn::new(
            self.current_board,
            self.boards[self.current_board].clone(),
            self.current_player,
            self.engine.fork(),
        ))
    }

    /// Applies a decided AI turn.
    ///
    /// A decision reporting [`AiError::NoMoves`] completes the active
    /// board as a draw.
    ///
    /// # Errors
    ///
    /// [`MoveError::StaleAiDecision`] if the tournament moved on (for
    /// example a reset) while the AI was thinking, plus any rejection
    /// [`Tournament::apply_move`] would give.
    #[instrument(skip(self))]
    pub fn finish_ai_turn(
        &mut self,
        decision: AiDecision,
    ) -> Result<Vec<TournamentEvent>, MoveError> {
        let was_thinking = std::mem::replace(&mut self.ai_thinking, false);

        if self.is_over() {
            return Err(MoveError::TournamentOver);
        }
        if !was_thinking
            || !self.is_ai_turn()
            || decision.board_index != self.current_board
            || decision.player != self.current_player
        {
            warn!(board = decision.board_index, "Discarding stale AI decision");
            return Err(MoveError::StaleAiDecision(decision.board_index));
        }

        match decision.choice {
            Ok(position) => self.apply(decision.board_index, position.to_index()),
            Err(AiError::NoMoves) => Ok(self.resolve_stalled_board()),
        }
    }

    /// Decides and applies the AI's move in one step.
    ///
    /// # Errors
    ///
    /// Same as [`Tournament::begin_ai_turn`].
    #[instrument(skip(self))]
    pub fn ai_move(&mut self) -> Result<Vec<TournamentEvent>, MoveError> {
        let turn = self.begin_ai_turn()?;
        self.finish_ai_turn(turn.decide())
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Clears all boards and scores; X opens on board 0.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Vec<TournamentEvent> {
        self.boards = Default::default();
        self.current_board = 0;
        self.current_player = Player::X;
        self.board_scores = [Score::default(); BOARD_COUNT];
        self.total_score = Score::default();
        self.status = TournamentStatus::InProgress;
        self.ai_thinking = false;
        self.history.clear();
        info!("Tournament reset");
        vec![TournamentEvent::TournamentReset]
    }

    /// Starts a fresh tournament with a new mode and difficulty.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, mode: GameMode, difficulty: Difficulty) -> Vec<TournamentEvent> {
        self.config.mode = mode;
        self.config.difficulty = difficulty;
        self.engine.set_difficulty(difficulty);
        self.reset()
    }

    /// Switches the opponent type; a mode switch starts a fresh tournament.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) -> Vec<TournamentEvent> {
        self.config.mode = mode;
        self.reset()
    }

    /// Ends the tournament because `expired` ran out of time.
    ///
    /// # Errors
    ///
    /// [`MoveError::TournamentOver`] if it has already ended.
    #[instrument(skip(self))]
    pub fn end_on_time(&mut self, expired: Player) -> Result<Vec<TournamentEvent>, MoveError> {
        if self.is_over() {
            return Err(MoveError::TournamentOver);
        }
        self.ai_thinking = false;
        let outcome = Outcome::Winner(expired.opponent());
        self.status = TournamentStatus::Over(outcome);
        info!(expired = %expired, "Tournament ended on time");
        Ok(vec![TournamentEvent::TournamentOver {
            outcome,
            mode: self.config.mode,
        }])
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Shared validation and scoring path for human and AI moves.
    fn apply(
        &mut self,
        board_index: usize,
        cell_index: usize,
    ) -> Result<Vec<TournamentEvent>, MoveError> {
        if self.is_over() {
            return Err(MoveError::TournamentOver);
        }
        if board_index >= BOARD_COUNT {
            return Err(MoveError::BoardOutOfRange(board_index));
        }
        if board_index != self.current_board {
            return Err(MoveError::WrongBoard {
                expected: self.current_board,
                actual: board_index,
            });
        }

        let player = self.current_player;
        let board = &mut self.boards[board_index];
        let position = board.place(cell_index, player)?;

        let action = Move::new(player, board_index, position);
        self.history.push(action);
        let mut events = vec![TournamentEvent::MoveApplied(action)];

        if let Some(winner) = board.winner() {
            board.reset();
            self.board_scores[board_index].credit(winner);
            let total = self.total_score.credit(winner);
            info!(board = board_index, winner = %winner, total, "Board won");
            events.push(TournamentEvent::BoardCompleted {
                board: board_index,
                outcome: Outcome::Winner(winner),
            });

            if total >= self.config.win_threshold {
                let outcome = Outcome::Winner(winner);
                self.status = TournamentStatus::Over(outcome);
                info!(winner = %winner, score = %self.total_score, "Tournament won");
                events.push(TournamentEvent::TournamentOver {
                    outcome,
                    mode: self.config.mode,
                });
                return Ok(events);
            }
        } else if board.is_draw() {
            board.reset();
            debug!(board = board_index, "Board drawn");
            events.push(TournamentEvent::BoardCompleted {
                board: board_index,
                outcome: Outcome::Draw,
            });
        }

        self.advance_turn(board_index);
        Ok(events)
    }

    /// Completes the active board as a draw when no move can be made on it.
    fn resolve_stalled_board(&mut self) -> Vec<TournamentEvent> {
        let board_index = self.current_board;
        warn!(board = board_index, "AI found no move; completing board as a draw");
        self.boards[board_index].reset();
        self.advance_turn(board_index);
        vec![TournamentEvent::BoardCompleted {
            board: board_index,
            outcome: Outcome::Draw,
        }]
    }

    fn advance_turn(&mut self, board_index: usize) {
        self.current_player = self.current_player.opponent();
        self.current_board = (board_index + 1) % BOARD_COUNT;
    }
}
