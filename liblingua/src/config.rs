//! Configuration management for LinguaConnect

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::logging::LogFormat;

/// Storage key the client has always written its state under
pub const DEFAULT_STORAGE_KEY: &str = "linguaconnect-state";

const FALLBACK_DATA_PATH: &str = "~/.local/share/lingua";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted state blob
    pub path: String,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error: the default configuration is used.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        if config.storage.key.trim().is_empty() {
            return Err(ConfigError::MissingField("storage.key".to_string()).into());
        }
        Ok(config)
    }

    /// Create a default configuration
    ///
    /// State lives under the platform data directory, or under
    /// `~/.local/share/lingua` when the platform reports none.
    pub fn default_config() -> Self {
        let path = match resolve_data_path() {
            Ok(dir) => dir.to_string_lossy().into_owned(),
            Err(_) => FALLBACK_DATA_PATH.to_string(),
        };

        Self {
            storage: StorageConfig {
                path,
                key: default_storage_key(),
            },
            logging: LoggingSection::default(),
        }
    }

    /// Storage directory with `~` and environment variables expanded
    pub fn expanded_storage_path(&self) -> PathBuf {
        let expanded = match shellexpand::full(&self.storage.path) {
            Ok(path) => path.into_owned(),
            // Unknown variable: keep it literal but still expand the home dir
            Err(_) => shellexpand::tilde(&self.storage.path).into_owned(),
        };
        PathBuf::from(expanded)
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("LINGUA_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("lingua").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory spec
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("lingua"))
}
