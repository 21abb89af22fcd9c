//! Simulation configuration loaded from code or JSON.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardConfig, BoardError};
use crate::constants::DEFAULT_SHUFFLE_PLAYERS;
use crate::player::{PlayerKind, VariantTuning};

/// Errors raised when a simulation configuration cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
    #[error("player lineup is empty")]
    EmptyLineup,
    #[error("lazy_dropped_steps must be at most {max} (got {value})")]
    DroppedStepsTooLarge { value: u32, max: u32 },
    #[error("unknown player kind: {0:?}")]
    UnknownPlayerKind(String),
    #[error("failed to parse simulation config")]
    Parse(#[from] serde_json::Error),
}

/// Everything needed to build a [`crate::Simulation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub board: BoardConfig,
    /// Player variants in seating order, one entry per player.
    #[serde(default = "SimulationConfig::default_players")]
    pub players: Vec<PlayerKind>,
    /// Seed for the die stream; `None` draws one from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Shuffle the seating order once before the first game.
    #[serde(default = "SimulationConfig::default_shuffle_players")]
    pub shuffle_players: bool,
    #[serde(default)]
    pub tuning: VariantTuning,
    /// Optional safety cap on rounds per game.
    #[serde(default)]
    pub max_rounds: Option<u32>,
}

impl SimulationConfig {
    fn default_players() -> Vec<PlayerKind> {
        PlayerKind::ALL.to_vec()
    }

    const fn default_shuffle_players() -> bool {
        DEFAULT_SHUFFLE_PLAYERS
    }

    #[must_use]
    pub fn new(players: Vec<PlayerKind>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle_players: bool) -> Self {
        self.shuffle_players = shuffle_players;
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: VariantTuning) -> Self {
        self.tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Parse a JSON document; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error from [`SimulationConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant and return the validated board.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<Board, ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::EmptyLineup);
        }
        self.tuning.validate()?;
        Ok(self.board.build()?)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            players: Self::default_players(),
            seed: None,
            shuffle_players: Self::default_shuffle_players(),
            tuning: VariantTuning::default(),
            max_rounds: None,
        }
    }
}
