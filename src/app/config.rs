use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Language;

const APP_DIR: &str = "apps-console";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// Console configuration, loaded from TOML with environment overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Management API base, e.g. `http://127.0.0.1:18083/api/v4`
    pub api_url: String,
    pub username: String,
    pub password: String,
    pub language: Language,
    pub request_timeout_secs: u64,
    pub clipboard_timeout_secs: u64,
    pub message_timeout_secs: u64,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let log_path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("console.log");

        Self {
            api_url: "http://127.0.0.1:18083/api/v4".to_string(),
            username: "admin".to_string(),
            password: "public".to_string(),
            language: Language::En,
            request_timeout_secs: 10,
            clipboard_timeout_secs: 15,
            message_timeout_secs: 5,
            log_path,
        }
    }
}

impl AppConfig {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Explicit path, then the default location, then built-in defaults.
    /// Environment variables win over all of them.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::load(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("APPS_CONSOLE_URL") {
            self.api_url = url;
        }
        if let Some(user) = var("APPS_CONSOLE_USERNAME") {
            self.username = user;
        }
        if let Some(pass) = var("APPS_CONSOLE_PASSWORD") {
            self.password = pass;
        }
        if let Some(lang) = var("APPS_CONSOLE_LANG") {
            self.language = lang.parse().unwrap_or_default();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn clipboard_timeout(&self) -> Duration {
        Duration::from_secs(self.clipboard_timeout_secs)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }
}
