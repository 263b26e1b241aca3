//! Tournament configuration.

use crate::{Difficulty, Player};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Number of boards played in rotation.
pub const BOARD_COUNT: usize = 8;

/// Boards a player must win to take the tournament.
pub const WIN_THRESHOLD: u32 = 3;

/// Longer threshold used by the browser edition of the game.
pub const WEB_WIN_THRESHOLD: u32 = 4;

/// Who the second seat is.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum GameMode {
    /// A human plays against the built-in AI.
    #[default]
    #[serde(rename = "ai")]
    #[strum(serialize = "ai")]
    AiOpponent,
    /// Two players share the device.
    #[serde(rename = "pvp")]
    #[strum(serialize = "pvp")]
    PlayerVsPlayer,
}

/// Settings a tournament is created with.
///
/// ```
/// use xo_engine::{Difficulty, GameMode, TournamentConfig};
///
/// let config = TournamentConfig::default()
///     .with_mode(GameMode::PlayerVsPlayer)
///     .with_difficulty(Difficulty::Hard);
/// assert_eq!(config.ai_player(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
pub struct TournamentConfig {
    /// Opponent type.
    pub mode: GameMode,
    /// AI strength (ignored in [`GameMode::PlayerVsPlayer`]).
    pub difficulty: Difficulty,
    /// Symbol of the human seat when playing the AI.
    pub human_player: Player,
    /// Boards needed to win the tournament.
    pub win_threshold: u32,
}

impl TournamentConfig {
    /// Symbol played by the AI, if the mode has one.
    pub fn ai_player(&self) -> Option<Player> {
        match self.mode {
            GameMode::AiOpponent => Some(self.human_player.opponent()),
            GameMode::PlayerVsPlayer => None,
        }
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::AiOpponent,
            difficulty: crate::Difficulty::default(),
            human_player: Player::X,
            win_threshold: WIN_THRESHOLD,
        }
    }
}
