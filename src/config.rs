//! Game configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::grid::COLUMNS;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "DAMSEL_RESCUE_CONFIG";

/// How strictly the key avoids rocks when it is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyPlacement {
    /// Reject a spot when its x matches any rock's x and its y matches any
    /// rock's y, checked per axis.
    #[default]
    Loose,
    /// Reject a spot only when a single rock sits on exactly that cell.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Enemies released per level.  The classic level has 5; any positive
    /// count is accepted.
    pub enemy_count: usize,
    /// Rocks scattered over the enemy lanes.
    pub rock_count: usize,
    pub key_placement: KeyPlacement,
    /// Frame budget of the scheduler in milliseconds.
    pub frame_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enemy_count: 5,
            rock_count: 3,
            key_placement: KeyPlacement::Loose,
            frame_ms: 33,
        }
    }
}

impl GameConfig {
    /// Upper bound for `rock_count`; one column must stay rock-free so key
    /// placement always finds a spot.
    pub const MAX_ROCKS: usize = COLUMNS - 1;

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    /// Load the file named by `DAMSEL_RESCUE_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enemy_count == 0 {
            return Err(ConfigError::NoEnemies);
        }
        if self.rock_count > Self::MAX_ROCKS {
            return Err(ConfigError::TooManyRocks {
                rock_count: self.rock_count,
                max: Self::MAX_ROCKS,
            });
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
