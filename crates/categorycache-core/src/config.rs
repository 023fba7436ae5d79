//! Application configuration management.
//!
//! This module handles loading the configuration, which holds the
//! API base URL and the retry timings used when fetching categories.
//!
//! Configuration is stored at `~/.config/categorycache/config.json`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::RetryPolicy;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "categorycache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "CATEGORYCACHE_API_URL";

/// API base URL used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/api";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub attempt_timeouts_ms: Option<Vec<u64>>,
    pub backoff_step_ms: Option<u64>,
    pub refresh_timeout_ms: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Base URL from the environment, then the config file, then the default.
    pub fn api_base_url(&self) -> String {
        self.api_base_url_with_env(std::env::var(API_URL_ENV).ok())
    }

    fn api_base_url_with_env(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        let attempt_timeouts = match &self.attempt_timeouts_ms {
            Some(ms) if !ms.is_empty() => ms.iter().copied().map(Duration::from_millis).collect(),
            _ => defaults.attempt_timeouts,
        };
        RetryPolicy {
            attempt_timeouts,
            backoff_step: self
                .backoff_step_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.backoff_step),
            refresh_timeout: self
                .refresh_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.refresh_timeout),
        }
    }
}
