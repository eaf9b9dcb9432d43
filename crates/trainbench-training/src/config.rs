//! Client configuration file support.
//!
//! Shared by the CLI and the TUI.

use crate::session::{ChainedSession, EnvSession, FixedSession, SessionFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Training service used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:7860";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable that overrides the configured backend URL.
pub const BACKEND_URL_ENV: &str = "TRAINBENCH_BACKEND_URL";

/// Client configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the training service
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Session id to use when none is given on the command line
    #[serde(default)]
    pub session_id: Option<String>,

    /// File the dataset step writes the active session id to
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

fn home_dir() -> PathBuf {
    std::env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."))
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> PathBuf {
        home_dir().join(".trainbench").join("config.toml")
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".trainbenchrc")
    }

    /// Session file written by the dataset step when none is configured.
    pub fn default_session_file() -> PathBuf {
        home_dir().join(".trainbench").join("session")
    }

    /// Discover and load configuration files.
    ///
    /// Loads configuration from:
    /// 1. Global config (~/.trainbench/config.toml)
    /// 2. Local config (./.trainbenchrc)
    /// 3. `TRAINBENCH_BACKEND_URL`
    ///
    /// Later sources override earlier ones. Unreadable files are skipped.
    pub fn discover_and_load() -> Self {
        let mut config = Self::default();

        if let Ok(global_config) = Self::load_from_file(&Self::default_global_path()) {
            config.merge(&global_config);
        }

        if let Ok(local_config) = Self::load_from_file(&Self::default_local_path()) {
            config.merge(&local_config);
        }

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config.backend_url = Some(url);
            }
        }

        config
    }

    /// Merge another configuration into this one.
    ///
    /// Values from `other` override values in `self` if they are Some.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ref url) = other.backend_url {
            self.backend_url = Some(url.clone());
        }
        if let Some(timeout) = other.request_timeout_secs {
            self.request_timeout_secs = Some(timeout);
        }
        if let Some(ref session_id) = other.session_id {
            self.session_id = Some(session_id.clone());
        }
        if let Some(ref session_file) = other.session_file {
            self.session_file = Some(session_file.clone());
        }
        if let Some(ref log_level) = other.log_level {
            self.log_level = Some(log_level.clone());
        }
    }

    /// Backend URL without a trailing slash.
    pub fn backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL).trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn session_file(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(Self::default_session_file)
    }

    /// Session lookup chain: explicit id, environment, config, session file.
    pub fn session_source(&self, explicit: Option<String>) -> ChainedSession {
        ChainedSession::new()
            .with(FixedSession::from(explicit))
            .with(EnvSession::default())
            .with(FixedSession::from(self.session_id.clone()))
            .with(SessionFile::new(self.session_file()))
    }
}
