//! Configuration loading for the emulation connector
//!
//! JSON documents; every field is optional and falls back to the default.
//!
//! ```json
//! {
//!   "name": "backtest-1",
//!   "start_time": "2024-01-02T09:30:00Z",
//!   "channel_capacity": 4096,
//!   "settings": { "is_support_atomic_re_register": false, "max_depth": 10 }
//! }
//! ```

use chrono::{DateTime, Utc};
use hermes_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::emulator::EmulatorSettings;

/// Root configuration of an emulation connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulationConfig {
    /// Connector name used in logs
    pub name: String,

    /// Simulated time the emulator starts at
    pub start_time: Timestamp,

    /// First transaction id handed out by the connector
    pub transaction_id_start: u64,

    /// Inbound channel capacity (`None` = unbounded)
    pub channel_capacity: Option<usize>,

    /// Buffer of the market data broadcast channel
    pub output_capacity: usize,

    /// Emulator settings
    pub settings: EmulatorSettings,
}

impl Default for EmulationConfig {
    fn default() -> Self {
        Self {
            name: "Hermes Emulation Connector".to_string(),
            start_time: DateTime::<Utc>::UNIX_EPOCH,
            transaction_id_start: 1,
            channel_capacity: None,
            output_capacity: 10_000,
            settings: EmulatorSettings::default(),
        }
    }
}

impl EmulationConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the connector cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == Some(0) {
            return Err(ConfigError::Invalid(
                "channel_capacity must be positive".to_string(),
            ));
        }
        if self.output_capacity == 0 {
            return Err(ConfigError::Invalid(
                "output_capacity must be positive".to_string(),
            ));
        }
        if self.settings.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "settings.max_depth must be positive".to_string(),
            ));
        }
        if self.settings.max_emissions_per_step == 0 {
            return Err(ConfigError::Invalid(
                "settings.max_emissions_per_step must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
