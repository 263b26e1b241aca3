//! XO Arena - terminal front end for XO tournaments
//!
//! Wraps the [`xo_engine`] arena with everything a session needs around it.
//!
//! # Architecture
//!
//! - **Settings**: TOML preferences (difficulty, clock, who moves first, PvP lock)
//! - **Store**: JSON statistics that survive between sessions
//! - **Players**: seats that produce moves (terminal input or an AI engine)
//! - **Scheduler**: runs AI turns on a blocking worker with a display delay
//! - **Orchestrator**: drives a tournament between seats and reports events

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod orchestrator;
mod players;
mod scheduler;
mod settings;
mod store;

// Crate-level exports - Preferences
pub use settings::{
    ConfigError, DEFAULT_PREFERENCES_FILE, DEFAULT_THINK_DELAY_MS, FirstPlayer, Preferences,
};

// Crate-level exports - Statistics store
pub use store::{DEFAULT_STATS_FILE, StatsRecord, StatsStore, StoreError};

// Crate-level exports - Seats
pub use players::{EnginePlayer, HumanPlayer, Player, PlayerAction};

// Crate-level exports - Orchestration
pub use orchestrator::{Orchestrator, SessionEvent};
pub use scheduler::AiScheduler;
