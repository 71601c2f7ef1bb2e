//! Application configuration
//!
//! Settings come from `<config dir>/yishuv-ranker/config.toml` when present,
//! then environment variables (a `.env` file is honored) override them.

pub mod repository;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::constants;

const APP_DIR: &str = "yishuv-ranker";
const CONFIG_FILE: &str = "config.toml";

/// Open-data API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub page_size: usize,
    pub population_resource: String,
    pub census_resource: String,
    pub socio_resource: String,
    pub timeout_secs: u64,
    /// Read JSON dumps from this directory instead of calling the API
    pub data_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: constants::BASE_URL.to_string(),
            page_size: constants::PAGE_SIZE,
            population_resource: constants::POPULATION_RESOURCE.to_string(),
            census_resource: constants::CENSUS_2022_RESOURCE.to_string(),
            socio_resource: constants::SOCIOECONOMIC_RESOURCE.to_string(),
            timeout_secs: 60,
            data_dir: None,
        }
    }
}

/// Defaults for battle mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub pool_size: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            pool_size: crate::services::battle::DEFAULT_POOL_SIZE,
        }
    }
}

/// Leaderboard display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Rows printed before the "showing N of M" note
    pub display_limit: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { display_limit: 200 }
    }
}

/// Local storage locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub export_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = app_dir();
        Self {
            database_path: base.join("yishuv-ranker.db"),
            export_dir: base.join("exports"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub battle: BattleConfig,
    pub leaderboard: LeaderboardConfig,
    pub storage: StorageConfig,
}

/// `~/.config/yishuv-ranker` (or the platform equivalent)
pub fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_config_path() -> PathBuf {
    app_dir().join(CONFIG_FILE)
}

impl Config {
    /// Load from the default location, or `path` when given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `YISHUV_*` overrides from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("YISHUV_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(size) = lookup("YISHUV_PAGE_SIZE") {
            self.api.page_size = size
                .trim()
                .parse()
                .with_context(|| format!("YISHUV_PAGE_SIZE is not a number: {}", size))?;
        }
        if let Some(dir) = lookup("YISHUV_DATA_DIR") {
            self.api.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(db) = lookup("YISHUV_DB_PATH") {
            self.storage.database_path = PathBuf::from(db);
        }
        if self.api.page_size == 0 {
            anyhow::bail!("API page size must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.base_url, constants::BASE_URL);
        assert_eq!(config.api.page_size, 10_000);
        assert_eq!(config.battle.pool_size, 16);
        assert_eq!(config.leaderboard.display_limit, 200);
        assert!(config.api.data_dir.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [api]
            page_size = 500

            [battle]
            pool_size = 32
            "#,
        )
        .unwrap();

        assert_eq!(config.api.page_size, 500);
        assert_eq!(config.api.population_resource, constants::POPULATION_RESOURCE);
        assert_eq!(config.battle.pool_size, 32);
        assert_eq!(config.leaderboard.display_limit, 200);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("YISHUV_PAGE_SIZE", "250"),
            ("YISHUV_DATA_DIR", "/tmp/dumps"),
        ]);
        let mut config = Config::default();
        config
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.page_size, 250);
        assert_eq!(config.api.data_dir, Some(PathBuf::from("/tmp/dumps")));
    }

    #[test]
    fn test_invalid_page_size_is_rejected() {
        let mut config = Config::default();
        assert!(config.apply_env(|k| (k == "YISHUV_PAGE_SIZE").then(|| "lots".to_string())).is_err());
        assert!(config.apply_env(|k| (k == "YISHUV_PAGE_SIZE").then(|| "0".to_string())).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[leaderboard]\ndisplay_limit = 50\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.leaderboard.display_limit, 50);
    }
}
