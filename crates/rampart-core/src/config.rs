//! Session configuration loaded from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. Compile-time tuning stays in [`crate::constants`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::types::ArenaGeometry;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for starting a new fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// RNG seed for drop rolls. Same seed and inputs = same fight.
    pub seed: u64,
    /// Stage to load (1-based).
    pub stage: u32,
    pub arena: ArenaGeometry,
    pub player_max_health: f32,
    pub player_grenades: u32,
    pub boss_max_health: f32,
    /// Probability that a dying grunt drops a pickup.
    pub drop_chance: f64,
    /// Interval between tower target re-checks (seconds).
    pub tower_recheck_secs: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            stage: 1,
            arena: ArenaGeometry::default(),
            player_max_health: PLAYER_MAX_HEALTH,
            player_grenades: PLAYER_START_GRENADES,
            boss_max_health: BOSS_MAX_HEALTH,
            drop_chance: DROP_CHANCE,
            tower_recheck_secs: TOWER_RECHECK_SECS,
        }
    }
}

impl CombatConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        let finite = [
            arena.left,
            arena.right,
            arena.ground_y,
            arena.camera_width,
            self.player_max_health,
            self.boss_max_health,
            self.tower_recheck_secs,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("non-finite value".into()));
        }
        if arena.right <= arena.left {
            return Err(ConfigError::Invalid(format!(
                "arena right ({}) must exceed left ({})",
                arena.right, arena.left
            )));
        }
        if arena.camera_width <= 0.0 || arena.camera_width > arena.right - arena.left {
            return Err(ConfigError::Invalid(format!(
                "camera width {} must be positive and fit the arena",
                arena.camera_width
            )));
        }
        if self.player_max_health <= 0.0 || self.boss_max_health <= 0.0 {
            return Err(ConfigError::Invalid("max health must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.drop_chance) {
            return Err(ConfigError::Invalid(format!(
                "drop chance {} outside [0, 1]",
                self.drop_chance
            )));
        }
        if self.tower_recheck_secs <= 0.0 {
            return Err(ConfigError::Invalid(
                "tower re-check interval must be positive".into(),
            ));
        }
        if self.stage == 0 {
            return Err(ConfigError::Invalid("stages are numbered from 1".into()));
        }
        Ok(())
    }
}
