//! Configuration
//!
//! `EngineConfig` holds the gameplay tunables; `AppConfig` wraps it with the
//! data directory and is read from a TOML file:
//!
//! ```toml
//! data_dir = "/home/me/.local/share/memory-trainer"
//!
//! [engine]
//! mismatch_delay_ms = 1200
//! pre_round_hints = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repetition::algorithm::DEFAULT_FAILURE_THRESHOLD;
use crate::storage::FileStore;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Gameplay tunables for a session engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay before `countdown` moves to `in-progress`
    pub countdown_ms: u64,
    /// How long a mismatched pair stays face-up
    pub mismatch_delay_ms: u64,
    pub match_points: u32,
    /// Extra points when both matched cards share a non-neutral category
    pub category_bonus_points: u32,
    /// Session failures of the same card combination before the pairs are
    /// persisted for review
    pub failure_threshold: u32,
    /// Failures of the same combination that trigger a tip
    pub tip_after_failures: u32,
    /// Emit an encouragement every this many moves (0 disables)
    pub encouragement_every_moves: u32,
    /// Number of feedback messages kept
    pub feedback_capacity: usize,
    /// Hold the countdown on a pre-round hint screen for levels with
    /// mnemonic or categorical hooks
    pub pre_round_hints: bool,
    /// Ignore selections unless the session is in progress
    pub gate_selection_on_status: bool,
    /// Seed for deck shuffling; random when unset
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            countdown_ms: 2000,
            mismatch_delay_ms: 1200,
            match_points: 10,
            category_bonus_points: 5,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            tip_after_failures: 3,
            encouragement_every_moves: 10,
            feedback_capacity: 3,
            pre_round_hints: false,
            gate_selection_on_status: false,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn countdown_delay(&self) -> Duration {
        Duration::from_millis(self.countdown_ms)
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feedback_capacity == 0 {
            return Err(ConfigError::Invalid("feedback_capacity must be at least 1".to_string()));
        }
        if self.failure_threshold == 0 {
            return Err(ConfigError::Invalid("failure_threshold must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Application configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where review data is stored; defaults to the platform data dir
    pub data_dir: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Read the config at `path` if given and present, else use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                log::warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStore::default_data_dir().map_err(|_| ConfigError::DataDirNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.countdown_delay(), Duration::from_millis(2000));
        assert_eq!(config.mismatch_delay(), Duration::from_millis(1200));
        assert_eq!(config.failure_threshold, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "data_dir = \"/tmp/trainer\"\n\n[engine]\nmismatch_delay_ms = 500\npre_round_hints = true\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/trainer")));
        assert_eq!(config.engine.mismatch_delay_ms, 500);
        assert!(config.engine.pre_round_hints);
        assert_eq!(config.engine.countdown_ms, 2000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[engine]\nfeedback_capacity = 0\n").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(Some(&temp_dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
