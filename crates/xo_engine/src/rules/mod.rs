//! Game rules for a single board.
//!
//! This module contains pure functions for evaluating board state.
//! The board, the AI and the tournament all go through these functions,
//! so there is exactly one table of winning lines.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WINNING_LINES, check_winner, winning_move};
