//! Multi-board tournament controller.

mod ai_turn;
mod config;
mod controller;

pub use ai_turn::{AiDecision, AiTurn};
pub use config::{BOARD_COUNT, GameMode, TournamentConfig, WEB_WIN_THRESHOLD, WIN_THRESHOLD};
pub use controller::Tournament;
