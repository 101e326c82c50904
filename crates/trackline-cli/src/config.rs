//! Configuration management for the CLI.
//!
//! The API token comes from the `TRACKLINE_TOKEN` environment variable
//! first, falling back to the config file under the home directory.

use crate::error::{CliError, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use trackline_sdk::TOKEN_ENV_VAR;

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// API token; the environment variable takes precedence
    pub token: Option<String>,

    /// Override for the API base URL (self-hosted mirrors, tests)
    pub base_url: Option<String>,

    /// Display settings
    #[serde(default)]
    pub settings: Settings,
}

/// Display settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// How many stories the listing shows by default
    #[serde(default = "default_story_limit")]
    pub story_limit: usize,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".trackline").join("config.toml"))
    }

    /// Load configuration from file or fall back to defaults.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the API token: environment first, then the config file.
    pub fn resolve_token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.token.clone())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            story_limit: 20,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_story_limit() -> usize {
    20
}
