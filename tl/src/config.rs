//! Configuration for tasklist

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::FilterStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the task collection file
    #[serde(rename = "store-path")]
    pub store_path: PathBuf,

    /// View used by `list` and `export` when no filter is given
    #[serde(rename = "default-filter")]
    pub default_filter: FilterStatus,
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tasklist")
        .join("tasks.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_filter: FilterStatus::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit path must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let candidates = [
            Some(PathBuf::from(".tasklist.yml")),
            dirs::config_dir().map(|p| p.join("tasklist").join("tasklist.yml")),
        ];

        for path in candidates.iter().flatten() {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_filter, FilterStatus::All);
        assert!(config.store_path.ends_with("tasklist/tasks.json"));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasklist.yml");
        fs::write(&path, "store-path: /tmp/mine.json\ndefault-filter: active\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/mine.json"));
        assert_eq!(config.default_filter, FilterStatus::Active);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasklist.yml");
        fs::write(&path, "default-filter: completed\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.default_filter, FilterStatus::Completed);
        assert_eq!(config.store_path, Config::default().store_path);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasklist.yml");
        fs::write(&path, "default-filter: done\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let temp = TempDir::new().unwrap();
        assert!(Config::load(Some(&temp.path().join("nope.yml"))).is_err());
    }
}
