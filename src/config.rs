//! Loading extra stage tables from TOML.
//!
//! `GAME_CONFIG_PATH` points at a file of `[[stages]]` tables. Each one adds a
//! stage or replaces the compiled-in stage with the same id:
//!
//! ```toml
//! [[stages]]
//! id = "forest-1"
//! area = "forest"
//! difficulty_override = "EASY"
//!
//! [[stages.questions]]
//! kind = "addition"
//! weight = 3
//! range = { min_num = 1, max_num = 5 }
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::error::ConfigError;
use crate::stages::{StageConfig, StageTable};

pub const CONFIG_PATH_ENV: &str = "GAME_CONFIG_PATH";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GameConfig {
  #[serde(default)]
  pub stages: Vec<StageConfig>,
}

impl GameConfig {
  pub fn from_toml_str(path: &str, raw: &str) -> Result<Self, ConfigError> {
    toml::from_str::<GameConfig>(raw).map_err(|source| ConfigError::Parse { path: path.to_string(), source })
  }

  /// Merge onto `base`, validating the result.
  pub fn apply(self, base: &StageTable) -> Result<StageTable, ConfigError> {
    Ok(base.with_overrides(self.stages)?)
  }
}

/// Load `GameConfig` from GAME_CONFIG_PATH. `Ok(None)` when the variable is unset.
pub fn load_game_config_from_env() -> Result<Option<GameConfig>, ConfigError> {
  let Ok(path) = std::env::var(CONFIG_PATH_ENV) else {
    return Ok(None);
  };
  load_game_config(&path).map(Some)
}

pub fn load_game_config(path: &str) -> Result<GameConfig, ConfigError> {
  let raw = std::fs::read_to_string(path).map_err(|source| {
    error!(target: "math_dungeon", %path, error = %source, "Failed to read TOML config file");
    ConfigError::Io { path: path.to_string(), source }
  })?;

  match GameConfig::from_toml_str(path, &raw) {
    Ok(cfg) => {
      info!(target: "math_dungeon", %path, stages = cfg.stages.len(), "Loaded game config (TOML)");
      Ok(cfg)
    }
    Err(e) => {
      error!(target: "math_dungeon", %path, error = %e, "Failed to parse TOML config");
      Err(e)
    }
  }
}
