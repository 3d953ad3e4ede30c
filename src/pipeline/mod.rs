//! Token Pipeline
//!
//! One normalization pipeline with two thin adapters:
//! - `listing`: every leaderboard entry, sorted and capped to a page
//! - `search`: entries matching a query, sorted, uncapped
//!
//! Plus the fallback generator used when the leaderboard has nothing to offer.

pub mod normalizer;
pub mod fallback;

pub use normalizer::{sort_tokens, TokenPipeline, DEFAULT_PAGE_SIZE, VOLUME_ESTIMATE_RATIO};
pub use fallback::{FallbackGenerator, FALLBACK_LIMIT};
