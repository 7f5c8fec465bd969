//! Configuration model.
//!
//! Settings are layered: built-in defaults, then the config file, then
//! environment variables, then command line flags.
//!
//! Environment variables:
//! - `OLLAMA_HOST`: host specifier (default: 0.0.0.0)
//! - `OLLAMA_MODEL`: model to monitor (default: gemma3:1b)
//! - `OLLAMA_PROMPT`: test prompt sent to the model
//! - `OLLAMA_CHECK_INTERVAL`: seconds between checks (default: 60)
//! - `OLLAMA_TIMEOUT`: request timeout in seconds (default: none)

use crate::core::resolver;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemma3:1b";
pub const DEFAULT_PROMPT: &str = "What is the capital of France?";
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;

/// One layer of optional settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Raw host specifier, as in `OLLAMA_HOST`.
    pub host: Option<String>,
    /// Model to monitor.
    pub model: Option<String>,
    /// Prompt sent by the model probe.
    pub prompt: Option<String>,
    /// Seconds between monitor cycles.
    pub check_interval_secs: Option<u64>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Read settings through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: non_empty("OLLAMA_HOST"),
            model: non_empty("OLLAMA_MODEL"),
            prompt: non_empty("OLLAMA_PROMPT"),
            check_interval_secs: non_empty("OLLAMA_CHECK_INTERVAL").and_then(|s| s.trim().parse().ok()),
            timeout_secs: non_empty("OLLAMA_TIMEOUT").and_then(|s| s.trim().parse().ok()),
        }
    }

    /// Read settings from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Layer `other` on top of `self`; values set in `other` win.
    pub fn overlay(self, other: Settings) -> Settings {
        Settings {
            host: other.host.or(self.host),
            model: other.model.or(self.model),
            prompt: other.prompt.or(self.prompt),
            check_interval_secs: other.check_interval_secs.or(self.check_interval_secs),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }
}

/// Resolved monitor configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Connectable API root, e.g. `http://127.0.0.1:11434/api`.
    pub api_base_url: String,
    /// Host specifier the daemon listens on, used for diagnostics.
    pub listen_host: String,
    pub target_model: String,
    pub prompt: String,
    pub check_interval_secs: u64,
    pub request_timeout_secs: Option<u64>,
}

impl MonitorConfig {
    /// Build the configuration from merged settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let listen_host = settings
            .host
            .clone()
            .unwrap_or_else(|| resolver::DEFAULT_LISTEN_HOST.to_string());

        let endpoint = resolver::resolve(&listen_host, resolver::DEFAULT_LISTEN_HOST)?;
        let target = resolver::probe_target(&endpoint)?;

        let check_interval_secs = settings
            .check_interval_secs
            .unwrap_or(DEFAULT_CHECK_INTERVAL_SECS);
        if check_interval_secs == 0 {
            return Err(Error::config("check interval must be greater than zero"));
        }

        Ok(Self {
            api_base_url: target.api_base_url,
            listen_host,
            target_model: settings
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            prompt: settings
                .prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            check_interval_secs,
            request_timeout_secs: settings.timeout_secs.filter(|t| *t > 0),
        })
    }

    /// Delay between monitor cycles.
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    /// Per-request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ollama_sentinel")
}

/// Path of the optional configuration file.
pub fn config_file_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Load settings from the config file (if present) overlaid with the environment.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&config_file_path())
}

/// Same as [`load_settings`] with an explicit config file path.
pub fn load_settings_from(config_path: &Path) -> Result<Settings> {
    let file = if config_path.exists() {
        tracing::debug!("Loading config file {}", config_path.display());
        Settings::from_file(config_path)?
    } else {
        Settings::default()
    };

    Ok(file.overlay(Settings::from_env()))
}
