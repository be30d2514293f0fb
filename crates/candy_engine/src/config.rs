//! Engine configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Rule parameters for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Side length of the square board.
    #[serde(default = "default_grid_size")]
    grid_size: usize,

    /// Number of tile varieties in play (3 to 6).
    #[serde(default = "default_variety_count")]
    variety_count: usize,

    /// Moves granted at the start of a game.
    #[serde(default = "default_initial_moves")]
    initial_moves: u32,

    /// Points for each cleared cell.
    #[serde(default = "default_points_per_tile")]
    points_per_tile: u32,
}

fn default_grid_size() -> usize {
    8
}

fn default_variety_count() -> usize {
    6
}

fn default_initial_moves() -> u32 {
    50
}

fn default_points_per_tile() -> u32 {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            variety_count: default_variety_count(),
            initial_moves: default_initial_moves(),
            points_per_tile: default_points_per_tile(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration, rejecting values the rules cannot play with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is out of range.
    #[instrument]
    pub fn new(
        grid_size: usize,
        variety_count: usize,
        initial_moves: u32,
        points_per_tile: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            grid_size,
            variety_count,
            initial_moves,
            points_per_tile,
        };
        config.validate()?;
        Ok(config)
    }

    /// Same configuration with a different move allowance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `initial_moves` is zero.
    pub fn with_initial_moves(self, initial_moves: u32) -> Result<Self, ConfigError> {
        Self::new(
            self.grid_size,
            self.variety_count,
            initial_moves,
            self.points_per_tile,
        )
    }

    /// Checks every parameter.
    ///
    /// Deserialized configs skip [`EngineConfig::new`], so the engine calls
    /// this again before building a board.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 3 {
            return Err(ConfigError::new(format!(
                "grid_size must be at least 3, got {}",
                self.grid_size
            )));
        }
        if !(3..=6).contains(&self.variety_count) {
            return Err(ConfigError::new(format!(
                "variety_count must be between 3 and 6, got {}",
                self.variety_count
            )));
        }
        if self.initial_moves == 0 {
            return Err(ConfigError::new(
                "initial_moves must be at least 1".to_string(),
            ));
        }
        if self.points_per_tile == 0 {
            return Err(ConfigError::new(
                "points_per_tile must be at least 1".to_string(),
            ));
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(*config.grid_size(), 8);
        assert_eq!(*config.variety_count(), 6);
        assert_eq!(*config.initial_moves(), 50);
        assert_eq!(*config.points_per_tile(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(EngineConfig::new(2, 6, 50, 10).is_err());
        assert!(EngineConfig::new(8, 2, 50, 10).is_err());
        assert!(EngineConfig::new(8, 7, 50, 10).is_err());
        assert!(EngineConfig::new(8, 6, 0, 10).is_err());
        assert!(EngineConfig::new(8, 6, 50, 0).is_err());
        assert!(EngineConfig::new(3, 3, 1, 1).is_ok());
    }

    #[test]
    fn test_error_records_location() {
        let err = EngineConfig::new(8, 9, 50, 10).unwrap_err();
        assert!(err.message.contains("variety_count"));
        assert!(err.file.ends_with("config.rs"));
        assert!(err.to_string().starts_with("Config error: variety_count"));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"initial_moves": 5}"#).unwrap();
        assert_eq!(*config.initial_moves(), 5);
        assert_eq!(*config.grid_size(), 8);
    }
}
