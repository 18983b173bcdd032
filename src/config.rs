use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::rotation::DEFAULT_CANDIDATE_LIMIT;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StrideConfig {
    pub log: LogConfig,
    pub extraction: ExtractionConfig,
    pub rotation: RotationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    /// TOML file with keyword tables. Built-in tables when unset.
    pub tables_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RotationConfig {
    /// How many top-ranked items stay in the draw.
    pub candidate_limit: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

/// Returns `~/.stride/`, or `./.stride/` when no home directory is known.
pub fn default_stride_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".stride")
}

/// Returns the default config file path: `~/.stride/config.toml`
pub fn default_config_path() -> PathBuf {
    default_stride_dir().join("config.toml")
}

impl StrideConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            StrideConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (STRIDE_LOG_LEVEL, STRIDE_TABLES,
    /// STRIDE_CANDIDATE_LIMIT).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("STRIDE_LOG_LEVEL") {
            self.log.level = val;
        }
        if let Ok(val) = std::env::var("STRIDE_TABLES") {
            self.extraction.tables_path = Some(val);
        }
        if let Ok(val) = std::env::var("STRIDE_CANDIDATE_LIMIT") {
            match val.parse() {
                Ok(limit) => self.rotation.candidate_limit = limit,
                Err(_) => warn!(value = %val, "ignoring invalid STRIDE_CANDIDATE_LIMIT"),
            }
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = StrideConfig::default();
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.extraction.tables_path, None);
        assert_eq!(config.rotation.candidate_limit, 50);
        assert!(default_config_path().ends_with(".stride/config.toml"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[log]
level = "debug"

[extraction]
tables_path = "/tmp/tables.toml"
"#;
        let config: StrideConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.extraction.tables_path.as_deref(), Some("/tmp/tables.toml"));
        // defaults still apply for unset sections
        assert_eq!(config.rotation.candidate_limit, 50);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        // Env overrides may be set by a concurrent test; only the load itself is checked.
        assert!(StrideConfig::load_from(dir.path().join("absent.toml")).is_ok());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[rotation]\ncandidate_limit = \"lots\"\n").unwrap();
        let err = StrideConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("parse config"));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = StrideConfig::default();
        std::env::set_var("STRIDE_LOG_LEVEL", "trace");
        std::env::set_var("STRIDE_TABLES", "/tmp/override.toml");
        std::env::set_var("STRIDE_CANDIDATE_LIMIT", "7");

        config.apply_env_overrides();

        assert_eq!(config.log.level, "trace");
        assert_eq!(config.extraction.tables_path.as_deref(), Some("/tmp/override.toml"));
        assert_eq!(config.rotation.candidate_limit, 7);

        // Clean up
        std::env::remove_var("STRIDE_LOG_LEVEL");
        std::env::remove_var("STRIDE_TABLES");
        std::env::remove_var("STRIDE_CANDIDATE_LIMIT");
    }

    #[test]
    fn tilde_expands_to_home() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/tables.toml"), home.join("tables.toml"));
        }
    }
}
