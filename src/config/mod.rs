use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    storage::json_backend::DEFAULT_RETENTION,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Serde(#[from] serde_json::Error),
}

/// User preferences persisted as `config.json` in the app data directory.
/// Relative paths resolve against that directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store_file: PathBuf,
    pub export_dir: PathBuf,
    pub backup_retention: usize,
    pub clear_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_file: PathBuf::from("store.json"),
            export_dir: PathBuf::from("exports"),
            backup_retention: DEFAULT_RETENTION,
            clear_screen: true,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Missing file yields defaults; unknown keys are ignored.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn store_path(&self, config: &Config) -> PathBuf {
        self.resolve(&config.store_file)
    }

    pub fn export_path(&self, config: &Config) -> PathBuf {
        self.resolve(&config.export_dir)
    }

    pub fn backups_path(&self) -> PathBuf {
        PathResolver::backup_dir_in(&self.base)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (ConfigManager, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        (manager, temp)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let (manager, _guard) = manager();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let (manager, _guard) = manager();
        let config = Config {
            backup_retention: 9,
            clear_screen: false,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let (manager, _guard) = manager();
        fs::write(manager.path(), r#"{ "clear_screen": false }"#).unwrap();
        let config = manager.load().unwrap();
        assert!(!config.clear_screen);
        assert_eq!(config.backup_retention, DEFAULT_RETENTION);
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let (manager, guard) = manager();
        let mut config = Config::default();
        assert_eq!(manager.store_path(&config), guard.path().join("store.json"));
        config.export_dir = guard.path().join("elsewhere");
        assert_eq!(manager.export_path(&config), guard.path().join("elsewhere"));
    }
}
