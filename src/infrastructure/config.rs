// src/infrastructure/config.rs
use crate::application::{Credentials, FailurePolicy, Session};
use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_TIMEOUT_SECS, DEFAULT_USER};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for the notes client
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiBackend {
    Graphql,
    #[default]
    File,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Http,
    #[default]
    Fs,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default)]
    pub backend: ApiBackend,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default = "default_notes_file")]
    pub file: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_storage_dir")]
    pub directory: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub on_failure: FailurePolicy,
    #[serde(default = "default_rollback_deletes")]
    pub rollback_deletes: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "default_user")]
    pub user: String,
}

// Default value functions
fn default_notes_file() -> String {
    data_path("notes.json")
}
fn default_storage_dir() -> String {
    data_path("images")
}
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }
fn default_rollback_deletes() -> bool { true }
fn default_user() -> String { DEFAULT_USER.to_string() }

fn data_path(name: &str) -> String {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(name))
        .unwrap_or_else(|| PathBuf::from(name))
        .to_string_lossy()
        .into_owned()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: ApiBackend::default(),
            endpoint: String::new(),
            api_key: None,
            bearer_token: None,
            file: default_notes_file(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            base_url: String::new(),
            directory: default_storage_dir(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            on_failure: FailurePolicy::default(),
            rollback_deletes: default_rollback_deletes(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Bearer token wins over an API key when both are configured.
    pub fn credentials(&self) -> Credentials {
        match (&self.bearer_token, &self.api_key) {
            (Some(token), _) if !token.is_empty() => Credentials::Bearer(token.clone()),
            (_, Some(key)) if !key.is_empty() => Credentials::ApiKey(key.clone()),
            _ => Credentials::Anonymous,
        }
    }
}

impl Config {
    /// Location of the config file in the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load the file at the default location, or defaults if there is none
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config");
                Self::load(path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Point both collaborators at local files below `dir`
    pub fn use_local_store(&mut self, dir: &Path) {
        self.api.backend = ApiBackend::File;
        self.api.file = dir.join("notes.json").to_string_lossy().into_owned();
        self.storage.backend = StorageBackend::Fs;
        self.storage.directory = dir.join("images").to_string_lossy().into_owned();
    }

    pub fn use_endpoint(&mut self, endpoint: &str) {
        self.api.backend = ApiBackend::Graphql;
        self.api.endpoint = endpoint.to_string();
    }

    pub fn session(&self) -> Session {
        Session::new(self.session.user.clone(), self.api.credentials())
    }
}
