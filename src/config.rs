//! Configuration Management
//!
//! Handles persistent configuration storage for roomkit.

use crate::api::client::DEFAULT_BASE_URL;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Environment override for the API root
pub const BASE_URL_ENV_VAR: &str = "ROOMKIT_BASE_URL";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// API root, e.g. `https://api-eu.vonage.com/v1`
    #[serde(default)]
    pub base_url: Option<String>,
    /// Bearer token used when neither flag nor environment provide one
    #[serde(default)]
    pub token: Option<String>,
    /// Default page size for list commands
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("roomkit").join("config.json"))
    }

    /// Load configuration from disk. Missing or unreadable files yield defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;

        // The file may hold a bearer token: owner-only on unix
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        // `mode` only applies on creation; tighten files saved by older versions
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(content.as_bytes())?;

        Ok(())
    }

    /// Effective API root (CLI > env > config > default)
    pub fn effective_base_url(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| non_empty_env(BASE_URL_ENV_VAR))
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Effective token (CLI > env > config)
    pub fn effective_token(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| non_empty_env(crate::api::auth::TOKEN_ENV_VAR))
            .or_else(|| self.token.clone())
    }

    /// Record values for `--save`. Only a token given on the command line is
    /// kept; one read from `ROOMKIT_TOKEN` stays in the environment.
    pub fn remember(&mut self, base_url: String, cli_token: Option<String>) {
        self.base_url = Some(base_url);
        if let Some(token) = cli_token {
            self.token = Some(token);
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}
