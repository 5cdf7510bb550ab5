use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::reducer::RootReducer;
use crate::registry::TransitionRegistry;
use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/reducegen/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("reducegen").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - At least one init action is configured
    /// - Init action names are non-empty and unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        let init_actions = &self.dispatch.init_actions;
        if init_actions.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one init action must be configured".to_string(),
            });
        }

        for (i, name) in init_actions.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Init action names must not be empty".to_string(),
                });
            }
            if init_actions[..i].contains(name) {
                return Err(ConfigError::ValidationError {
                    message: format!("Duplicate init action '{}'", name),
                });
            }
        }

        Ok(())
    }

    /// The action type a store dispatches when it is created.
    pub fn store_init_action(&self) -> &str {
        self.dispatch
            .init_actions
            .first()
            .map(String::as_str)
            .unwrap_or(crate::registry::INIT)
    }

    /// Build a registry seeded with the configured init actions.
    pub fn build_registry(&self) -> Arc<TransitionRegistry> {
        Arc::new(TransitionRegistry::with_init_actions(
            self.dispatch.init_actions.iter().cloned(),
        ))
    }

    /// Build a root reducer over `registry` with the configured policy.
    pub fn build_reducer(
        &self,
        default_state: Value,
        registry: Arc<TransitionRegistry>,
    ) -> RootReducer {
        RootReducer::new(default_state, registry).with_policy(self.dispatch.policy)
    }
}
