//! Configuration module for aws-select
//!
//! Settings come from `<config_dir>/aws-select/config.toml` when it exists,
//! overridden by `AWS_SELECT_*` environment variables. A missing file is not
//! an error; every key has a default.

use crate::recents::RecentsStore;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override the config file
pub const ENV_PREFIX: &str = "AWS_SELECT";

/// Keys accepted by `config get` and `config set`
pub const KEYS: [&str; 5] = ["recents_file", "use_recents", "aws_program", "default_limit", "log_level"];

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Recents file; `~/.aws-select/recents.json` when unset
    pub recents_file: Option<PathBuf>,

    /// Remember and offer recent selections
    pub use_recents: bool,

    /// Program invoked for AWS calls
    pub aws_program: String,

    /// Page size for every kind, overriding the per-kind default
    pub default_limit: Option<usize>,

    /// Log filter used when `AWS_SELECT_LOG` is unset
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recents_file: None,
            use_recents: true,
            aws_program: "aws".to_string(),
            default_limit: None,
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("aws-select").join("config.toml"))
    }

    /// Load configuration from the default file and the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed,
    /// or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?, None)
    }

    /// Load configuration from `path`, layered with environment overrides
    ///
    /// `env` replaces the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed,
    /// or a value has the wrong type.
    pub fn load_from(path: &Path, env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Recents store location, if one can be determined
    #[must_use]
    pub fn recents_path(&self) -> Option<PathBuf> {
        self.recents_file.clone().or_else(RecentsStore::default_path)
    }

    /// Current value of `key` as text; unset optional values are empty
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "recents_file" => self
                .recents_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            "use_recents" => self.use_recents.to_string(),
            "aws_program" => self.aws_program.clone(),
            "default_limit" => self.default_limit.map(|limit| limit.to_string()).unwrap_or_default(),
            "log_level" => self.log_level.clone().unwrap_or_default(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set `key` from text; an empty value clears optional keys
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or values of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let optional = || Some(value.to_string()).filter(|v| !v.is_empty());

        match key {
            "recents_file" => self.recents_file = optional().map(PathBuf::from),
            "use_recents" => {
                self.use_recents = value.parse().map_err(|_| {
                    ConfigError::Message(format!("Invalid value for use_recents: '{value}'. Use 'true' or 'false'"))
                })?;
            }
            "aws_program" => {
                if value.is_empty() {
                    return Err(ConfigError::Message("aws_program cannot be empty".to_string()));
                }
                self.aws_program = value.to_string();
            }
            "default_limit" => {
                self.default_limit = optional()
                    .map(|v| v.parse::<usize>())
                    .transpose()
                    .map_err(|_| {
                        ConfigError::Message(format!("Invalid value for default_limit: '{value}'. Use a positive number"))
                    })?;
            }
            "log_level" => self.log_level = optional(),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::NotFound(format!("{key} (available keys: {})", KEYS.join(", ")))
}
