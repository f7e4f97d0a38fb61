//! Application state: the stage table the server generates against.
//!
//! The table is the compiled-in one, optionally merged with stages from
//! `GAME_CONFIG_PATH`. It is immutable once built, so handlers share it
//! behind an `Arc` with no locking.

use std::collections::BTreeMap;

use tracing::{info, instrument};

use crate::config::load_game_config_from_env;
use crate::domain::Area;
use crate::error::ConfigError;
use crate::stages::StageTable;

#[derive(Clone, Debug)]
pub struct AppState {
    pub stages: StageTable,
}

impl AppState {
    /// Build state from env: compiled-in table plus any TOML stages.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Result<Self, ConfigError> {
        let stages = match load_game_config_from_env()? {
            Some(cfg) => cfg.apply(StageTable::builtin())?,
            None => {
                info!(target: "math_dungeon", "No GAME_CONFIG_PATH set. Using built-in stage table.");
                StageTable::builtin().clone()
            }
        };
        Ok(Self::with_table(stages))
    }

    /// Wrap an already validated table.
    pub fn with_table(stages: StageTable) -> Self {
        log_inventory(&stages);
        Self { stages }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_table(StageTable::builtin().clone())
    }
}

fn log_inventory(stages: &StageTable) {
    let mut by_area: BTreeMap<Area, (usize, usize)> = BTreeMap::new();
    for stage in stages.iter() {
        let entry = by_area.entry(stage.area).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += stage.questions.len();
    }
    for (area, (count, entries)) in by_area {
        info!(target: "math_dungeon", ?area, stages = count, entries, "Startup stage inventory");
    }
}
