//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    Config, ConfigError, LeaderboardSection, ListingSection, LoggingSection, ServerSection,
    load_config, load_config_or_default, resolve_config, DEFAULT_CONFIG_PATH,
    LEADERBOARD_URL_ENV, MAX_PAGE_SIZE, PORT_ENV,
};
