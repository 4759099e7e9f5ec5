//! Game settings loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use rocknraft_engine::{BoardConfig, Difficulty};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "ROCKNRAFT_CONFIG";

/// Settings for new games.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Grid columns.
    #[serde(default = "default_side")]
    width: usize,

    /// Grid rows.
    #[serde(default = "default_side")]
    height: usize,

    /// Rocks per raft (easy, medium or hard).
    #[serde(default)]
    difficulty: Difficulty,

    /// Open-water positions.
    #[serde(default = "default_empty_cells")]
    empty_cells: usize,

    /// Seconds of memorise time per difficulty unit.
    #[serde(default = "default_memorize_seconds")]
    memorize_seconds: u64,

    /// Fixed RNG seed for reproducible games.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_side() -> usize {
    3
}

fn default_empty_cells() -> usize {
    1
}

fn default_memorize_seconds() -> u64 {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: default_side(),
            height: default_side(),
            difficulty: Difficulty::default(),
            empty_cells: default_empty_cells(),
            memorize_seconds: default_memorize_seconds(),
            seed: None,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        info!(difficulty = %settings.difficulty, "Settings loaded");
        Ok(settings)
    }

    /// Loads the file named by `ROCKNRAFT_CONFIG`, or the defaults if unset.
    #[instrument]
    pub fn from_env() -> Result<Self, SettingsError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                debug!("No settings file configured, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overrides the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Board shape for a new game.
    pub fn board_config(&self) -> BoardConfig {
        let config = BoardConfig::new(self.difficulty)
            .with_size(self.width, self.height)
            .with_empty_cells(self.empty_cells);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// How long the fully revealed board is shown before play starts.
    pub fn memorize_time(&self) -> Duration {
        Duration::from_secs(self.memorize_seconds * self.difficulty.memorize_units())
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
