//! Player preferences persisted as TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use xo_engine::{
    ClockRules, DEFAULT_TIME_BUDGET, Difficulty, GameMode, Player as Mark, TournamentConfig,
    WIN_THRESHOLD,
};

/// Preferences file used when none is given.
pub const DEFAULT_PREFERENCES_FILE: &str = "xo_arena.toml";

/// Default pause before an AI move is shown.
pub const DEFAULT_THINK_DELAY_MS: u64 = 600;

/// Which seat takes the first move (X) in a game against the AI.
///
/// Defaults to [`FirstPlayer::Human`] so the player moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FirstPlayer {
    /// The human plays X.
    #[default]
    Human,
    /// The AI plays X.
    Ai,
}

impl FirstPlayer {
    /// Returns the display label for this option.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "Player",
            Self::Ai => "AI",
        }
    }

    /// Symbol played by the human seat.
    pub fn human_mark(self) -> Mark {
        match self {
            Self::Human => Mark::X,
            Self::Ai => Mark::O,
        }
    }
}

/// User-configurable preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Whether two-player mode may be selected.
    pvp_unlocked: bool,

    /// AI strength for new games.
    difficulty: Difficulty,

    /// Clock budget per player in timed games.
    game_duration_secs: u64,

    /// Who plays X against the AI.
    first_player: FirstPlayer,

    /// Pause before an AI move is applied.
    think_delay_ms: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            pvp_unlocked: false,
            difficulty: Difficulty::default(),
            game_duration_secs: DEFAULT_TIME_BUDGET.as_secs(),
            first_player: FirstPlayer::default(),
            think_delay_ms: DEFAULT_THINK_DELAY_MS,
        }
    }
}

impl Preferences {
    /// Loads preferences from a TOML file.
    ///
    /// A missing file yields the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No preferences file, using defaults");
            return Ok(Self::default());
        }

        debug!("Loading preferences from file");
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read preferences: {}", e)))?;

        let prefs: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse preferences: {}", e)))?;

        info!(difficulty = %prefs.difficulty, pvp_unlocked = prefs.pvp_unlocked, "Preferences loaded");
        Ok(prefs)
    }

    /// Writes preferences to a TOML file.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize preferences: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::new(format!("Failed to write preferences: {}", e)))?;

        debug!("Preferences saved");
        Ok(())
    }

    /// Allows two-player mode.
    pub fn unlock_pvp(&mut self) {
        self.pvp_unlocked = true;
    }

    /// Forbids two-player mode.
    pub fn lock_pvp(&mut self) {
        self.pvp_unlocked = false;
    }

    /// Sets the AI strength.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Sets the clock budget. Zero is raised to one second.
    pub fn set_game_duration_secs(&mut self, secs: u64) {
        self.game_duration_secs = secs.max(1);
    }

    /// Sets who plays X against the AI.
    pub fn set_first_player(&mut self, first_player: FirstPlayer) {
        self.first_player = first_player;
    }

    /// Sets the AI move delay.
    pub fn set_think_delay_ms(&mut self, ms: u64) {
        self.think_delay_ms = ms;
    }

    /// Returns the mode actually allowed for a request.
    ///
    /// Two-player mode falls back to the AI opponent while locked.
    #[instrument(skip(self))]
    pub fn resolve_mode(&self, requested: GameMode) -> GameMode {
        match requested {
            GameMode::PlayerVsPlayer if !self.pvp_unlocked => {
                warn!("Two-player mode is locked, playing against the AI");
                GameMode::AiOpponent
            }
            mode => mode,
        }
    }

    /// Builds a tournament configuration for the requested mode.
    pub fn tournament_config(&self, requested: GameMode) -> TournamentConfig {
        TournamentConfig {
            mode: self.resolve_mode(requested),
            difficulty: self.difficulty,
            human_player: self.first_player.human_mark(),
            win_threshold: WIN_THRESHOLD,
        }
    }

    /// Clock rules using the configured duration.
    pub fn clock_rules(&self) -> ClockRules {
        ClockRules::default().with_budget(Duration::from_secs(self.game_duration_secs))
    }

    /// Pause before an AI move is applied.
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}

impl std::fmt::Display for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pvp = if self.pvp_unlocked { "unlocked" } else { "locked" };
        writeln!(f, "Two-player mode: {}", pvp)?;
        writeln!(f, "Difficulty:      {}", self.difficulty)?;
        writeln!(f, "Game duration:   {}s", self.game_duration_secs)?;
        writeln!(f, "First player:    {}", self.first_player.label())?;
        write!(f, "AI think delay:  {}ms", self.think_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
