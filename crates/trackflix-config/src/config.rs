use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trackflix_models::WatchStatus;

use crate::paths::PathManager;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Data file location; falls back to `<data_dir>/trackflix.db`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Values pre-filled when prompting for a new entry.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub status: WatchStatus,
    /// Release year offered at the prompt; current year when unset
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default = "default_movie_duration")]
    pub movie_duration: u32,
    #[serde(default = "default_seasons")]
    pub seasons: u32,
    #[serde(default = "default_episodes_per_season")]
    pub episodes_per_season: u32,
    #[serde(default = "default_episode_duration")]
    pub episode_duration: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON logs on or off; unset means "JSON when not on a terminal"
    #[serde(default)]
    pub json: Option<bool>,
    /// Also write a daily-rotated log file here
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_movie_duration() -> u32 {
    120
}

fn default_seasons() -> u32 {
    1
}

fn default_episodes_per_season() -> u32 {
    10
}

fn default_episode_duration() -> u32 {
    45
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            status: WatchStatus::Planned,
            year: None,
            movie_duration: default_movie_duration(),
            seasons: default_seasons(),
            episodes_per_season: default_episodes_per_season(),
            episode_duration: default_episode_duration(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let defaults = &self.defaults;
        if defaults.movie_duration == 0 {
            return Err(anyhow::anyhow!("defaults.movie_duration must be positive"));
        }
        if defaults.seasons == 0 {
            return Err(anyhow::anyhow!("defaults.seasons must be positive"));
        }
        if defaults.episodes_per_season == 0 {
            return Err(anyhow::anyhow!("defaults.episodes_per_season must be positive"));
        }
        if defaults.episode_duration == 0 {
            return Err(anyhow::anyhow!("defaults.episode_duration must be positive"));
        }
        if let Some(year) = defaults.year {
            if year < trackflix_models::EARLIEST_RELEASE_YEAR {
                return Err(anyhow::anyhow!("defaults.year {} is before the first film", year));
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(anyhow::anyhow!("Invalid logging.level: {}", self.logging.level));
        }

        Ok(())
    }

    /// Resolved data file path.
    pub fn database_path(&self, paths: &PathManager) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| paths.database_file())
    }
}
