use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use memory_trainer_lib::config::{AppConfig, EngineConfig};
use memory_trainer_lib::levels::{all_levels, LevelConfig};
use memory_trainer_lib::repetition::SpacedRepetitionStore;
use memory_trainer_lib::storage::FileStore;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub data_dir: PathBuf,
    store: Arc<FileStore>,
}

impl App {
    /// Load configuration and open the review data directory
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config =
            AppConfig::load_or_default(config_path).context("Failed to load configuration")?;
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }

        let data_dir = config
            .resolve_data_dir()
            .context("Failed to get data directory")?;
        let store = FileStore::new(data_dir.clone()).context("Failed to initialize storage")?;

        log::debug!("Using data directory {}", data_dir.display());

        Ok(Self {
            config,
            data_dir,
            store: Arc::new(store),
        })
    }

    /// Review store backed by the data directory
    pub fn repetition(&self) -> SpacedRepetitionStore {
        SpacedRepetitionStore::with_system_clock(self.store.clone())
    }

    /// Engine settings, with an optional seed override
    pub fn engine_config(&self, seed: Option<u64>) -> EngineConfig {
        let mut engine = self.config.engine.clone();
        if seed.is_some() {
            engine.seed = seed;
        }
        engine
    }

    /// Find a level by id (case-insensitive prefix match)
    pub fn find_level(&self, id: &str) -> Result<LevelConfig> {
        let levels = all_levels();
        let id_lower = id.to_lowercase();

        // Exact match first
        if let Some(level) = levels.iter().find(|l| l.id == id_lower) {
            return Ok(level.clone());
        }

        let matches: Vec<&LevelConfig> = levels
            .iter()
            .filter(|l| l.id.starts_with(&id_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No level matching '{}'. Available levels:\n{}",
                id,
                levels.iter().map(|l| format!("  - {}", l.id)).collect::<Vec<_>>().join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous level id '{}'. Matches:\n{}",
                id,
                matches.iter().map(|l| format!("  - {}", l.id)).collect::<Vec<_>>().join("\n")
            ),
        }
    }
}
