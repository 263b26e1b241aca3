//! XO engine - multi-board tic-tac-toe tournaments
//!
//! Eight 3x3 boards are played in rotation. A completed board is credited
//! to its winner and cleared, and the first player to reach the win
//! threshold takes the tournament.
//!
//! # Architecture
//!
//! - **Board**: cells, placement and the single table of winning lines
//! - **AI**: Easy (random), Medium (win/block), Hard (minimax with alpha-beta)
//! - **Tournament**: the state machine every move goes through
//! - **Observers**: [`Statistics`] and the optional [`TournamentClock`],
//!   fed by the events the tournament emits
//! - **Arena**: a tournament wired to its observers
//!
//! # Example
//!
//! ```
//! use xo_engine::{GameMode, Player, Score, Tournament, TournamentConfig};
//!
//! let config = TournamentConfig::default().with_mode(GameMode::PlayerVsPlayer);
//! let mut tournament = Tournament::new(config);
//!
//! tournament.apply_move(0, 0).unwrap();
//! assert_eq!(tournament.current_board(), 1);
//! assert_eq!(tournament.current_player(), Player::O);
//! assert_eq!(tournament.total_score(), Score::default());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod ai;
mod arena;
mod board;
mod clock;
mod events;
mod phases;
mod position;
pub mod rules;
mod snapshot;
mod statistics;
mod tournament;
mod types;

// Crate-level exports - Core types
pub use action::{Move, MoveError};
pub use board::Board;
pub use phases::{Outcome, TournamentStatus};
pub use position::{CellCategory, Position};
pub use types::{Cell, Player, Score};

// Crate-level exports - Rules
pub use rules::{WINNING_LINES, check_winner, is_draw, is_full, winning_move};

// Crate-level exports - AI
pub use ai::{
    AiEngine, AiError, Difficulty, SearchReport, WIN_SCORE, best_move,
    heuristic_move, random_move,
};

// Crate-level exports - Tournament
pub use events::TournamentEvent;
pub use snapshot::TournamentSnapshot;
pub use tournament::{
    AiDecision, AiTurn, BOARD_COUNT, GameMode, Tournament, TournamentConfig, WEB_WIN_THRESHOLD,
    WIN_THRESHOLD,
};

// Crate-level exports - Observers
pub use arena::{Arena, ArenaEvent};
pub use clock::{
    ClockEvent, ClockRules, DEFAULT_TIME_BUDGET, DRAW_PENALTY, LOSS_PENALTY, TournamentClock,
    WIN_BONUS,
};
pub use statistics::{PlayerResult, PlayerStats, Statistics};
