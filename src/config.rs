//! Runtime configuration.
//!
//! Precedence, lowest first: built-in defaults, `config.toml` in the user
//! config directory, `SNIPPET_VAULT_*` environment variables, CLI flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "snippet-vault";
pub const ENV_DATA_DIR: &str = "SNIPPET_VAULT_DATA_DIR";
pub const ENV_LOG: &str = "SNIPPET_VAULT_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where `database.json` lives; defaults to the platform data directory
    pub data_dir: Option<PathBuf>,
    /// tracing filter directive, e.g. `info` or `snippet_vault=debug`
    pub log_level: String,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: String::from("warn"),
            color: true,
        }
    }
}

impl Config {
    /// Loads the config file (explicit path, or the default location if it exists)
    /// and applies environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `SNIPPET_VAULT_*` overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
    }

    /// Picks the data directory: CLI override, then config/env, then the platform default
    pub fn resolve_data_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir().context("Failed to get data directory")?;
        Ok(base.join(APP_DIR))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str("color = false").unwrap();
        assert!(!config.color);
        assert_eq!(config.log_level, "warn");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn env_overrides_file() {
        let mut config = Config::from_toml_str(
            r#"
            data_dir = "/from/file"
            log_level = "info"
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> =
            [(ENV_DATA_DIR, "/from/env"), (ENV_LOG, "")].into_iter().collect();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_dir, Some(PathBuf::from("/from/env")));
        // empty values are ignored
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn cli_override_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        let dir = config.resolve_data_dir(Some(Path::new("/from/cli"))).unwrap();
        assert_eq!(dir, PathBuf::from("/from/cli"));
        assert_eq!(
            config.resolve_data_dir(None).unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::from_toml_str("color = \"maybe\"").is_err());
    }
}
