//! Host settings: engine rules plus pacing and seeding.
//!
//! Settings come from an optional TOML file and are then overridden by the
//! `CANDY_SEED` and `CANDY_SETTLE_MS` environment variables.

use candy_engine::{ConfigError, Engine, EngineConfig};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the seed.
pub const SEED_VAR: &str = "CANDY_SEED";

/// Environment variable overriding the settle time.
pub const SETTLE_MS_VAR: &str = "CANDY_SETTLE_MS";

/// Everything the host needs to run a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Seed for a reproducible game. Entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,

    /// Minimum pause between cascade steps, in milliseconds.
    #[serde(default = "default_settle_ms")]
    settle_ms: u64,

    /// Rule parameters.
    #[serde(default)]
    engine: EngineConfig,
}

fn default_settle_ms() -> u64 {
    250
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            settle_ms: default_settle_ms(),
            engine: EngineConfig::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be read or parsed, or the
    /// engine section is out of range.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = toml::from_str(&content)?;
        settings.engine.validate()?;
        info!(
            seed = ?settings.seed,
            settle_ms = settings.settle_ms,
            "Settings loaded"
        );
        Ok(settings)
    }

    /// Loads the file if given, otherwise defaults, then applies the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if loading fails or an override is malformed.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.with_env(|name| std::env::var(name).ok())
    }

    /// Applies `CANDY_SEED` and `CANDY_SETTLE_MS` as looked up by `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if a variable is set but not a number.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        if let Some(raw) = lookup(SEED_VAR) {
            let seed = parse_override(SEED_VAR, &raw)?;
            debug!(seed, "Seed overridden from environment");
            self.seed = Some(seed);
        }
        if let Some(raw) = lookup(SETTLE_MS_VAR) {
            let settle_ms = parse_override(SETTLE_MS_VAR, &raw)?;
            debug!(settle_ms, "Settle time overridden from environment");
            self.settle_ms = settle_ms;
        }
        Ok(self)
    }

    /// Replaces the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the settle time.
    pub fn with_settle_ms(mut self, settle_ms: u64) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    /// Replaces the engine rules.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Minimum pause between cascade steps.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Builds an engine from these settings, seeded when a seed is set.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the engine rules are out of range.
    #[instrument(skip(self), fields(seed = ?self.seed))]
    pub fn build_engine(&self) -> Result<Engine, SettingsError> {
        let engine = match self.seed {
            Some(seed) => Engine::seeded(self.engine, seed)?,
            None => Engine::from_entropy(self.engine)?,
        };
        Ok(engine)
    }

    /// Renders the settings as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn parse_override(name: &str, raw: &str) -> Result<u64, SettingsError> {
    raw.trim()
        .parse()
        .map_err(|e| SettingsError::new(format!("{name}={raw:?} is not a number: {e}")))
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
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Failed to read settings file: {}", err))
    }
}

impl From<toml::de::Error> for SettingsError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Failed to parse settings: {}", err))
    }
}

impl From<toml::ser::Error> for SettingsError {
    #[track_caller]
    fn from(err: toml::ser::Error) -> Self {
        Self::new(format!("Failed to render settings: {}", err))
    }
}

impl From<ConfigError> for SettingsError {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        Self::new(err.message)
    }
}
