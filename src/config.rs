//! Puzzle configuration.
//!
//! Every field is optional in the TOML file; missing fields fall back to
//! the defaults of the classic 4×4 puzzle.

use crate::puzzle::{BoardError, DEFAULT_SHUFFLE_FACTOR, Grid};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Bootstrap parameters for a puzzle session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Grid side length (at least 2).
    #[serde(default = "default_size")]
    size: usize,

    /// Shuffle attempts per board cell.
    #[serde(default = "default_shuffle_factor")]
    shuffle_factor: usize,

    /// Width of the rendered board, in terminal columns.
    #[serde(default = "default_display_size")]
    display_size: u16,

    /// Pause before the initial shuffle, letting the first frame settle.
    #[serde(default = "default_shuffle_delay_ms")]
    shuffle_delay_ms: u64,
}

#[instrument]
fn default_size() -> usize {
    4
}

#[instrument]
fn default_shuffle_factor() -> usize {
    DEFAULT_SHUFFLE_FACTOR
}

#[instrument]
fn default_display_size() -> u16 {
    48
}

#[instrument]
fn default_shuffle_delay_ms() -> u64 {
    500
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            shuffle_factor: default_shuffle_factor(),
            display_size: default_display_size(),
            shuffle_delay_ms: default_shuffle_delay_ms(),
        }
    }
}

impl PuzzleConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(size = config.size, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different grid size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Checks that the values describe a playable, drawable puzzle.
    #[instrument(skip(self), fields(size = self.size, display_size = self.display_size))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        Grid::validate_size(self.size)?;
        if usize::from(self.display_size) < self.size {
            return Err(ConfigError::new(format!(
                "display_size {} is narrower than {} cells",
                self.display_size, self.size
            )));
        }
        Ok(())
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
    /// Creates a new configuration error.
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

impl From<BoardError> for ConfigError {
    #[track_caller]
    fn from(err: BoardError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = PuzzleConfig::from_toml_str("").unwrap();
        assert_eq!(config, PuzzleConfig::default());
        assert_eq!(*config.size(), 4);
        assert_eq!(*config.shuffle_factor(), 20);
        assert_eq!(*config.shuffle_delay_ms(), 500);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = PuzzleConfig::from_toml_str("size = 3\nshuffle_factor = 5\n").unwrap();
        assert_eq!(*config.size(), 3);
        assert_eq!(*config.shuffle_factor(), 5);
        assert_eq!(*config.display_size(), 48);
    }

    #[test]
    fn test_rejects_size_below_two() {
        let err = PuzzleConfig::from_toml_str("size = 1").unwrap_err();
        assert!(err.message.contains("Invalid configuration"));
    }

    #[test]
    fn test_rejects_display_narrower_than_grid() {
        let err = PuzzleConfig::from_toml_str("size = 8\ndisplay_size = 4").unwrap_err();
        assert!(err.message.contains("narrower"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = PuzzleConfig::from_toml_str("size = \"four\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_with_size_overrides() {
        let config = PuzzleConfig::default().with_size(5);
        assert_eq!(*config.size(), 5);
        assert!(config.validate().is_ok());
    }
}
