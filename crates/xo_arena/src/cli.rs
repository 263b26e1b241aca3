//! Command-line interface for xo_arena.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xo_arena::{DEFAULT_PREFERENCES_FILE, DEFAULT_STATS_FILE, FirstPlayer};
use xo_engine::{Difficulty, GameMode};

/// XO Arena - eight-board tic-tac-toe tournaments in the terminal
#[derive(Parser, Debug)]
#[command(name = "xo_arena")]
#[command(about = "Eight-board tic-tac-toe tournaments against the AI or a friend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Preferences file (created on first change)
    #[arg(long, global = true, default_value = DEFAULT_PREFERENCES_FILE)]
    pub preferences: PathBuf,

    /// Statistics file
    #[arg(long, global = true, default_value = DEFAULT_STATS_FILE)]
    pub stats_file: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a tournament on the terminal
    Play {
        /// Opponent: "ai" or "pvp" (pvp must be unlocked in settings)
        #[arg(short, long, default_value = "ai")]
        mode: GameMode,

        /// AI strength (defaults to the saved preference)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Play against the clock
        #[arg(long)]
        timed: bool,
    },

    /// Run engine-vs-engine tournaments and print a summary
    Simulate {
        /// Number of tournaments
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Strength of the X engine
        #[arg(long, default_value = "medium")]
        x_difficulty: Difficulty,

        /// Strength of the O engine
        #[arg(long, default_value = "hard")]
        o_difficulty: Difficulty,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show or clear saved statistics
    Stats {
        /// Delete all saved statistics
        #[arg(long)]
        reset: bool,
    },

    /// Show or change preferences
    Settings {
        /// Allow two-player mode
        #[arg(long, conflicts_with = "lock_pvp")]
        unlock_pvp: bool,

        /// Forbid two-player mode
        #[arg(long)]
        lock_pvp: bool,

        /// Default AI strength
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Clock budget per player, in seconds
        #[arg(long)]
        duration: Option<u64>,

        /// Who plays X against the AI: "human" or "ai"
        #[arg(long)]
        first_player: Option<FirstPlayer>,

        /// Pause before AI moves, in milliseconds
        #[arg(long)]
        think_delay_ms: Option<u64>,
    },
}
