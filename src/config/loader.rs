//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section has
//! defaults, so an empty file (or no file at all) yields a working setup.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::bags::{
    BagsClientConfig, DEFAULT_LEADERBOARD_URL, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use crate::pipeline::DEFAULT_PAGE_SIZE;

/// Largest page the listing endpoint may be configured to serve
pub const MAX_PAGE_SIZE: usize = 100;

/// Config file used when no `--config` is given
pub const DEFAULT_CONFIG_PATH: &str = "config/bagsdex.toml";

/// Overrides `server.port`
pub const PORT_ENV: &str = "BAGSDEX_PORT";

/// Overrides `leaderboard.api_url`
pub const LEADERBOARD_URL_ENV: &str = "BAGSDEX_LEADERBOARD_URL";

/// Main configuration structure matching bagsdex.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub leaderboard: LeaderboardSection,
    #[serde(default)]
    pub listing: ListingSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// HTTP server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Send permissive CORS headers (needed when the UI is served elsewhere)
    pub cors_enabled: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_enabled: true,
        }
    }
}

/// Upstream leaderboard configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeaderboardSection {
    /// Leaderboard endpoint URL
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent sent upstream
    pub user_agent: String,
    /// Append a cache-busting timestamp to every request
    pub cache_bust: bool,
    /// Reject leaderboard bodies larger than this
    pub max_body_bytes: usize,
}

impl Default for LeaderboardSection {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LEADERBOARD_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_bust: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Listing behaviour configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingSection {
    /// Maximum tokens returned by the listing endpoint
    pub page_size: usize,
    /// Serve generated placeholder tokens when the leaderboard is empty
    pub fallback_enabled: bool,
    /// Seed for synthesized 24h change and fallback tokens
    pub filler_seed: u64,
}

impl Default for ListingSection {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fallback_enabled: true,
            filler_seed: 0,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file, apply env overrides, then validate
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.finish(env_lookup)
}

/// Load configuration, falling back to defaults when the file does not exist
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Config::default().finish(env_lookup);
    }
    load_config(path)
}

/// Load an explicitly requested file, or the default path when none was given.
/// Only the default path may be absent.
pub fn resolve_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => load_config_or_default(DEFAULT_CONFIG_PATH),
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl Config {
    /// Apply overrides from `lookup` (the process env in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("{} must be a port number, got {:?}", PORT_ENV, port))
            })?;
        }

        if let Some(url) = lookup(LEADERBOARD_URL_ENV) {
            self.leaderboard.api_url = url;
        }

        Ok(())
    }

    fn finish<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply_overrides(lookup)?;
        self.validate()?;
        Ok(self)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::ValidationError(
                "host cannot be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "port must be > 0".to_string(),
            ));
        }

        let url = &self.leaderboard.api_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api_url must be an http(s) URL, got {:?}",
                url
            )));
        }

        if self.leaderboard.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.leaderboard.max_body_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "max_body_bytes must be > 0".to_string(),
            ));
        }

        if self.listing.page_size == 0 || self.listing.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "page_size must be 1-{}, got {}",
                MAX_PAGE_SIZE, self.listing.page_size
            )));
        }

        Ok(())
    }
}

// Conversion from the leaderboard section to the HTTP client config
impl From<&LeaderboardSection> for BagsClientConfig {
    fn from(section: &LeaderboardSection) -> Self {
        BagsClientConfig {
            api_url: section.api_url.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
            user_agent: section.user_agent.clone(),
            cache_bust: section.cache_bust,
            max_body_bytes: section.max_body_bytes,
        }
    }
}
