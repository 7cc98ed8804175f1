pub mod add;
pub mod config;
pub mod export;
pub mod list;
pub mod menu;
pub mod prompts;
pub mod render;
pub mod stats;
pub mod update;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::path::PathBuf;
use trackflix_config::{Config, PathManager};
use trackflix_core::{CatalogService, SqliteStore};

/// Resolved paths and settings shared by every command.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub db_override: Option<PathBuf>,
}

impl AppContext {
    /// `--db` wins over `[database] path`, which wins over the platform data dir.
    pub fn database_path(&self) -> PathBuf {
        self.db_override
            .clone()
            .unwrap_or_else(|| self.config.database_path(&self.paths))
    }

    pub fn open_catalog(&self) -> Result<CatalogService<SqliteStore>> {
        let path = self.database_path();
        let store = SqliteStore::open(&path)
            .wrap_err_with(|| format!("Failed to open media database at {}", path.display()))?;
        Ok(CatalogService::new(store))
    }
}
