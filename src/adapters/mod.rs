//! Adapters Layer - External System Implementations
//!
//! - Bags: bags.fm leaderboard client (implements LeaderboardPort)
//! - HTTP: axum API serving listing and search
//! - CLI: Command-line interface definitions

pub mod bags;
pub mod http;
pub mod cli;

pub use bags::BagsClient;
pub use http::create_router;
pub use cli::CliApp;
