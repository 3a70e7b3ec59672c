use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// What the course list does when the store cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFailurePolicy {
    /// Show an empty list and only log the failure.
    Silent,
    /// Show an empty list plus a notice in the status line.
    #[default]
    Notice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Scope courses to signed-in accounts.
    #[serde(default)]
    pub multi_user: bool,

    #[serde(default)]
    pub read_failure: ReadFailurePolicy,

    /// Accept any category text instead of the built-in catalog.
    #[serde(default)]
    pub allow_custom_categories: bool,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studyfacil");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("courses.db").to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            multi_user: false,
            read_failure: ReadFailurePolicy::default(),
            allow_custom_categories: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Reads the config at `path`, writing defaults there first if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studyfacil")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: Config = toml::from_str(r#"db_path = "/tmp/courses.db""#).unwrap();
        assert_eq!(config.db_path, "/tmp/courses.db");
        assert!(!config.multi_user);
        assert!(!config.allow_custom_categories);
        assert_eq!(config.read_failure, ReadFailurePolicy::Notice);
    }

    #[test]
    fn read_failure_policy_is_lowercase_in_toml() {
        let config: Config = toml::from_str(
            r#"
            db_path = "x.db"
            multi_user = true
            read_failure = "silent"
            "#,
        )
        .unwrap();
        assert!(config.multi_user);
        assert_eq!(config.read_failure, ReadFailurePolicy::Silent);
    }

    #[test]
    fn load_from_creates_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.db_path, created.db_path);
        assert_eq!(reloaded.read_failure, created.read_failure);
    }

    #[test]
    fn load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "multi_user = \"maybe\"").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(AppError::TomlParse(_))
        ));
    }
}
