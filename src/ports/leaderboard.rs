//! Leaderboard port
//!
//! Source of raw leaderboard entries. Implementations own transport and
//! payload decoding; callers decide how to degrade on failure.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::RawLeaderboardEntry;

/// Leaderboard fetch errors
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Leaderboard returned status {0}")]
    Status(u16),

    #[error("Leaderboard payload exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Failed to parse leaderboard payload: {0}")]
    Parse(String),
}

/// Leaderboard data source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardPort: Send + Sync {
    /// Fetch all entries currently on the leaderboard.
    ///
    /// An unsuccessful or unrecognized payload is `Ok(vec![])`, not an error.
    async fn fetch_entries(&self) -> Result<Vec<RawLeaderboardEntry>, LeaderboardError>;
}
