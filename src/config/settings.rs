/// Configuration structures

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://public-api.birdeye.so";
pub const API_KEY_ENV: &str = "BIRDEYE_API_KEY";
pub const BASE_URL_ENV: &str = "BIRDEYE_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub birdeye: Birdeye,
    pub retry: Retry,
    pub rate_limit: RateLimit,
    pub sniper: Sniper,
    pub display: Display,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Birdeye {
    pub api_key: String,
    pub base_url: String,
    /// Value of the `x-chain` header
    pub chain: String,
    pub timeout_secs: u64,
}

impl Default for Birdeye {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chain: "solana".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Retry {
    pub enabled: bool,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub multiplier: f64,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 4_000,
            multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimit {
    /// 0 disables client-side throttling
    pub requests_per_second: u32,
    pub burst: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Sniper {
    /// Seconds after first observed activity that still count as a snipe
    pub window_seconds: u64,
    /// `limit` sent per seek_by_time request
    pub fetch_page_size: usize,
    /// Hard cap on trades pulled across all pages
    pub max_trades: usize,
}

impl Default for Sniper {
    fn default() -> Self {
        Self {
            window_seconds: 1,
            fetch_page_size: 50,
            max_trades: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Display {
    /// Snipers shown per page
    pub page_size: usize,
}

impl Default for Display {
    fn default() -> Self {
        Self { page_size: 25 }
    }
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// File (when given) first, then environment overrides
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.birdeye.api_key = key;
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.birdeye.base_url = url;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.birdeye.api_key.trim().is_empty() {
            bail!("Birdeye API key is not set (config [birdeye].api_key or {})", API_KEY_ENV);
        }
        if self.sniper.fetch_page_size == 0 {
            bail!("[sniper].fetch_page_size must be greater than zero");
        }
        if self.sniper.max_trades == 0 {
            bail!("[sniper].max_trades must be greater than zero");
        }
        if self.display.page_size == 0 {
            bail!("[display].page_size must be greater than zero");
        }
        if self.retry.enabled && self.retry.max_attempts == 0 {
            bail!("[retry].max_attempts must be at least 1 when retries are enabled");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.birdeye.timeout_secs)
    }
}
