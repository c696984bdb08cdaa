// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule parameters loaded from TOML

use crate::CELL_COUNT;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Goats that can ever be on the board: every point except the four tigers
pub const MAX_PLACEABLE_GOATS: u8 = (CELL_COUNT - 4) as u8;

/// Errors loading or validating a rules configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rules: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_goats must be between 1 and 21, got {0}")]
    MaxGoats(u8),

    #[error("captures_to_win must be between 1 and max_goats ({max_goats}), got {value}")]
    CapturesToWin { value: u8, max_goats: u8 },
}

/// Tunable rule parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Goats placed before goats start moving
    #[serde(default = "default_max_goats")]
    pub max_goats: u8,
    /// Captures that win the game for the tigers
    #[serde(default = "default_captures_to_win")]
    pub captures_to_win: u8,
}

fn default_max_goats() -> u8 {
    20
}

fn default_captures_to_win() -> u8 {
    5
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_goats: default_max_goats(),
            captures_to_win: default_captures_to_win(),
        }
    }
}

impl RulesConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded rules from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_goats == 0 || self.max_goats > MAX_PLACEABLE_GOATS {
            return Err(ConfigError::MaxGoats(self.max_goats));
        }
        if self.captures_to_win == 0 || self.captures_to_win > self.max_goats {
            return Err(ConfigError::CapturesToWin {
                value: self.captures_to_win,
                max_goats: self.max_goats,
            });
        }
        Ok(())
    }
}
