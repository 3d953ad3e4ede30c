//! bags.fm Adapter
//!
//! Implements `LeaderboardPort` against the public bags.fm token-launch
//! leaderboard.
//!
//! # Example
//!
//! ```rust,ignore
//! use bagsdex::adapters::bags::BagsClient;
//! use bagsdex::ports::LeaderboardPort;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BagsClient::new()?;
//!     let entries = client.fetch_entries().await?;
//!     println!("{} tokens on the leaderboard", entries.len());
//!     Ok(())
//! }
//! ```

mod client;

pub use client::{
    BagsClient, BagsClientConfig, DEFAULT_LEADERBOARD_URL, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
