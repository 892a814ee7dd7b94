//! Core configuration file support (TOML).
//!
//! Covers backend selection and scoring-table overrides. Every field has a
//! default, so an absent or empty file yields a working configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::scoring::{FASTEST_LAP_BONUS, RACE_POINTS, SPRINT_POINTS};
use crate::models::ScoringTable;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
}

/// Repository backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

/// Scoring-table overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_race_points")]
    pub race_points: Vec<f64>,
    #[serde(default = "default_sprint_points")]
    pub sprint_points: Vec<f64>,
    #[serde(default = "default_fastest_lap_bonus")]
    pub fastest_lap_bonus: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            race_points: default_race_points(),
            sprint_points: default_sprint_points(),
            fastest_lap_bonus: default_fastest_lap_bonus(),
        }
    }
}

impl ScoringSettings {
    pub fn to_table(&self) -> ScoringTable {
        ScoringTable {
            race_points: self.race_points.clone(),
            sprint_points: self.sprint_points.clone(),
            fastest_lap_bonus: self.fastest_lap_bonus,
        }
    }
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_race_points() -> Vec<f64> {
    RACE_POINTS.to_vec()
}

fn default_sprint_points() -> Vec<f64> {
    SPRINT_POINTS.to_vec()
}

fn default_fastest_lap_bonus() -> f64 {
    FASTEST_LAP_BONUS
}

impl CoreConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("failed to read config file: {}", e),
                ErrorContext::new("load_config").with_entity_id(path.display()),
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> RepositoryResult<Self> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("invalid config file: {}", e),
                ErrorContext::new("load_config"),
            )
        })
    }

    /// The configured scoring table.
    pub fn scoring_table(&self) -> ScoringTable {
        self.scoring.to_table()
    }
}
