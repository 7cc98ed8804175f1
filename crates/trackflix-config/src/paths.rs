use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override taken from `TRACKFLIX_HOME`, if set.
pub fn home_override() -> Option<PathBuf> {
    std::env::var_os("TRACKFLIX_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("trackflix");

        Ok(Self::from_base(base_dir))
    }

    /// Lay everything out under a single directory: config at the top, data and logs in subdirs.
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn database_file(&self) -> PathBuf {
        self.data_dir.join("trackflix.db")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.data_dir.join("exports")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = home_override() {
            return Self::from_base(base);
        }

        // Platform config dir (e.g. ~/.config/trackflix on Linux), falling back to the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(".trackflix"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_base() {
        let paths = PathManager::from_base("/tmp/tf");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/tf/config.toml"));
        assert_eq!(paths.database_file(), PathBuf::from("/tmp/tf/data/trackflix.db"));
        assert_eq!(paths.log_dir(), Path::new("/tmp/tf/logs"));
        assert_eq!(paths.export_dir(), PathBuf::from("/tmp/tf/data/exports"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("home"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
