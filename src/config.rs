//! Top-level configuration, loadable from a JSON file

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::GameConfig;
use crate::leaderboard::LeaderboardConfig;

/// Game and leaderboard settings
///
/// Every field has a default, so a config file only needs the keys it
/// changes, e.g. `{"game": {"tick_ms": 80}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub leaderboard: LeaderboardConfig,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: AppConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()
    }
}
