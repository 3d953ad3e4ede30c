//! Token Service
//!
//! Use cases behind the two API routes. Fetches the leaderboard, degrades
//! any upstream failure to an empty result, and feeds the entries through
//! the listing or search adapter of the shared pipeline.

use std::sync::Arc;

use crate::adapters::bags::{BagsClient, BagsClientConfig};
use crate::config::Config;
use crate::domain::{RawLeaderboardEntry, StatusFilter, Token};
use crate::pipeline::{FallbackGenerator, TokenPipeline};
use crate::ports::{Clock, LeaderboardError, LeaderboardPort, SeededFiller, SystemClock};

/// Where a listing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    Leaderboard,
    Fallback,
    Empty,
}

/// Listing/search use cases over a leaderboard port
#[derive(Clone)]
pub struct TokenService {
    leaderboard: Arc<dyn LeaderboardPort>,
    pipeline: TokenPipeline,
    clock: Arc<dyn Clock>,
    fallback: Option<FallbackGenerator>,
}

impl TokenService {
    pub fn new(
        leaderboard: Arc<dyn LeaderboardPort>,
        pipeline: TokenPipeline,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            leaderboard,
            pipeline,
            clock,
            fallback: None,
        }
    }

    /// Wire the bags.fm client, wall clock and seeded filler from config
    pub fn from_config(config: &Config) -> Result<Self, LeaderboardError> {
        let client = BagsClient::with_config(BagsClientConfig::from(&config.leaderboard))?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let pipeline = TokenPipeline::new(
            config.listing.page_size,
            clock.clone(),
            Arc::new(SeededFiller::new(config.listing.filler_seed)),
        );

        let service = Self::new(Arc::new(client), pipeline, clock);
        if config.listing.fallback_enabled {
            Ok(service.with_fallback(FallbackGenerator::new(config.listing.filler_seed)))
        } else {
            Ok(service)
        }
    }

    /// Serve generated placeholder tokens when the leaderboard is empty
    pub fn with_fallback(mut self, generator: FallbackGenerator) -> Self {
        self.fallback = Some(generator);
        self
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback.is_some()
    }

    /// Current listing, capped to a page and narrowed by `filter`
    pub async fn list_tokens(&self, filter: StatusFilter) -> Vec<Token> {
        let (tokens, source) = self.listing().await;
        let tokens = filter.apply(tokens);
        tracing::info!(
            "Returning {} tokens (source: {:?}, filter: {:?})",
            tokens.len(),
            source,
            filter
        );
        tokens
    }

    /// Tokens matching `query`, uncapped. A blank query never reaches upstream.
    pub async fn search_tokens(&self, query: &str) -> Vec<Token> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        tracing::info!("Searching for: {:?}", query);
        let entries = self.fetch_or_empty().await;
        let tokens = self.pipeline.search(&entries, query);
        tracing::info!("Found {} matching tokens", tokens.len());
        tokens
    }

    async fn listing(&self) -> (Vec<Token>, ListingSource) {
        let entries = self.fetch_or_empty().await;

        if !entries.is_empty() {
            return (self.pipeline.listing(&entries), ListingSource::Leaderboard);
        }

        match &self.fallback {
            Some(generator) => {
                tracing::warn!("No tokens from leaderboard, using fallback data");
                (generator.generate(self.clock.as_ref()), ListingSource::Fallback)
            }
            None => (Vec::new(), ListingSource::Empty),
        }
    }

    async fn fetch_or_empty(&self) -> Vec<RawLeaderboardEntry> {
        match self.leaderboard.fetch_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Leaderboard fetch failed, degrading to empty: {}", e);
                Vec::new()
            }
        }
    }
}
