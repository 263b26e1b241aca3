//! Serializable view of a tournament.

use super::{BOARD_COUNT, Board, Cell, GameMode, Outcome, Player, Score};
use serde::{Deserialize, Serialize};

/// Everything a front end needs to draw a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    /// Cells of every board, row-major.
    pub boards: [[Cell; 9]; BOARD_COUNT],
    /// Board the next move must be played on.
    pub current_board: usize,
    /// Player to move.
    pub current_player: Player,
    /// Boards won overall.
    pub total_score: Score,
    /// Boards won per board slot.
    pub board_scores: [Score; BOARD_COUNT],
    /// True once the tournament has ended.
    pub game_over: bool,
    /// Final result, once over.
    pub winner: Option<Outcome>,
    /// True while an AI move is being computed.
    pub ai_thinking: bool,
    /// Opponent type.
    pub mode: GameMode,
    /// Boards needed to win.
    pub win_threshold: u32,
}

impl TournamentSnapshot {
    /// The active board.
    pub fn active_board(&self) -> Board {
        Board::from_cells(self.boards[self.current_board])
    }

    /// One-line status for display.
    pub fn status_string(&self) -> String {
        match self.winner {
            Some(Outcome::Winner(player)) => {
                format!("Tournament over. Player {} wins {}!", player, self.total_score)
            }
            Some(Outcome::Draw) => format!("Tournament over. Draw at {}.", self.total_score),
            None if self.ai_thinking => {
                format!("Board {}: AI ({}) is thinking...", self.current_board + 1, self.current_player)
            }
            None => format!(
                "Board {} of {}: {} to move",
                self.current_board + 1,
                BOARD_COUNT,
                self.current_player
            ),
        }
    }
}

impl std::fmt::Display for TournamentSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Score {} (first to {})",
            self.total_score, self.win_threshold
        )?;
        writeln!(f, "{}", self.status_string())?;
        if !self.game_over {
            writeln!(f)?;
            write!(f, "{}", self.active_board())?;
        }
        Ok(())
    }
}
