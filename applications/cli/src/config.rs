//! CLI configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "encore.toml";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Loading or deserializing failed
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// An explicitly requested file does not exist
    #[error("Configuration file not found: {0}")]
    MissingFile(PathBuf),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncoreConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins if set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl EncoreConfig {
    /// Load configuration from file and environment
    ///
    /// Sources, lowest priority first:
    /// 1. built-in defaults
    /// 2. `path`, or `encore.toml` in the working directory if it exists
    /// 3. `ENCORE_*` environment variables, `__` between sections
    ///    (e.g. `ENCORE_STORAGE__DATABASE_URL`)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::MissingFile(path.to_path_buf()));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ENCORE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config: EncoreConfig = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.database_url must not be empty".to_string(),
            ));
        }
        if !self.storage.database_url.starts_with("sqlite:") {
            return Err(ConfigError::Invalid(format!(
                "storage.database_url must be a sqlite URL, got {}",
                self.storage.database_url
            )));
        }
        Ok(())
    }
}

fn default_database_url() -> String {
    "sqlite://encore.db".to_string()
}

fn default_log_filter() -> String {
    "encore=info".to_string()
}
