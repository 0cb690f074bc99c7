//! Engine configuration loading from TOML.
//!
//! T013: Implement EngineConfig with plan and XP defaults
//! T014: Implement config load/save under the platform data directory

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable defaults for the progression engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Configuration schema version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Plan length assumed when a plan does not specify one
    pub default_total_weeks: u32,
    /// Workouts per week assumed for weekly completion rates
    pub default_scheduled_per_week: u32,
    /// Total scheduled workouts assumed for the overall completion rate
    pub default_total_scheduled_workouts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            default_total_weeks: 8,
            default_scheduled_per_week: 3,
            default_total_scheduled_workouts: 20,
        }
    }
}

impl EngineConfig {
    /// Path of the SQLite document store inside the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("progress.db")
    }
}

/// Get the platform-specific data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "fitquest", "FitQuest")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration from disk, creating defaults if absent.
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        let config = EngineConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content =
        std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;
    let mut config: EngineConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.data_dir = get_data_dir();

    Ok(config)
}

/// Save configuration to disk.
pub fn save_config(config: &EngineConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;
    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.default_total_weeks, 8);
        assert_eq!(config.default_scheduled_per_week, 3);
        assert_eq!(config.default_total_scheduled_workouts, 20);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = EngineConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.default_total_weeks, config.default_total_weeks);
    }
}
