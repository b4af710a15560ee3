//! # Configuration
//!
//! Optional TOML file; every section and key has a default.
//!
//! ```toml
//! [api]
//! base_url = "https://rickandmortyapi.com/api"
//!
//! [notes]
//! path = "/home/me/.local/share/catalog-browser/notes.json"
//!
//! [coordinator]
//! mailbox = 32
//! ```

use crate::coordinator::DEFAULT_MAILBOX;
use crate::notes::JsonFileStore;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct BrowserConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    catalog_api::BASE_URL.to_string()
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct NotesConfig {
    /// Falls back to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CoordinatorConfig {
    #[serde(default = "default_mailbox")]
    pub mailbox: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            mailbox: default_mailbox(),
        }
    }
}

fn default_mailbox() -> usize {
    DEFAULT_MAILBOX
}

impl BrowserConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BrowserConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
        }
        if self.coordinator.mailbox == 0 {
            return Err(ConfigError::Invalid("coordinator.mailbox must be at least 1".into()));
        }
        Ok(())
    }

    /// Where notes live: the configured path, else the platform default.
    pub fn notes_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.notes.path {
            Some(path) => Ok(path.clone()),
            None => JsonFileStore::default_path().ok_or_else(|| {
                ConfigError::Invalid("no notes.path set and no home directory found".into())
            }),
        }
    }
}
