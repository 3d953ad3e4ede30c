//! bagsdex - bags.fm Token Feed Library
//!
//! Fetches the bags.fm token-launch leaderboard, normalizes each entry into a
//! display-ready token and serves listing/search over HTTP.
//!
//! # Modules
//!
//! - `domain`: Core types (Token, TokenStatus, StatusFilter, RawLeaderboardEntry)
//! - `ports`: Trait abstractions (LeaderboardPort, Clock, FillerSource)
//! - `pipeline`: Normalization, ordering and fallback generation
//! - `adapters`: External implementations (bags.fm client, HTTP API, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Listing and search use cases

pub mod domain;
pub mod ports;
pub mod pipeline;
pub mod adapters;
pub mod config;
pub mod application;
