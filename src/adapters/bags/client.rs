//! bags.fm Leaderboard Client
//!
//! Fetches the token-launch leaderboard over HTTPS and decodes it with the
//! tolerant payload decoder. Every request carries a cache-busting query
//! parameter and no-cache headers so polls always see fresh data.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA, USER_AGENT};
use reqwest::Client;
use serde_json::Value;

use crate::domain::{decode_payload, PayloadShape, RawLeaderboardEntry};
use crate::ports::{LeaderboardError, LeaderboardPort};

/// Public bags.fm leaderboard endpoint
pub const DEFAULT_LEADERBOARD_URL: &str = "https://api2.bags.fm/api/v1/token-launch/leaderboard";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; bagsdex/1.0)";

/// Largest leaderboard body read before giving up
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Configuration for the BagsClient
#[derive(Debug, Clone)]
pub struct BagsClientConfig {
    /// Leaderboard endpoint URL
    pub api_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header sent upstream
    pub user_agent: String,
    /// Append `_=<unix millis>` to every request
    pub cache_bust: bool,
    /// Response bodies larger than this are rejected unparsed
    pub max_body_bytes: usize,
}

impl Default for BagsClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LEADERBOARD_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_bust: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl BagsClientConfig {
    /// Create config with a custom endpoint URL
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}

/// HTTP client for the bags.fm leaderboard
#[derive(Debug, Clone)]
pub struct BagsClient {
    config: BagsClientConfig,
    http: Client,
}

impl BagsClient {
    /// Create a new BagsClient with default configuration
    pub fn new() -> Result<Self, LeaderboardError> {
        Self::with_config(BagsClientConfig::default())
    }

    /// Create a new BagsClient with custom configuration
    pub fn with_config(config: BagsClientConfig) -> Result<Self, LeaderboardError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &BagsClientConfig {
        &self.config
    }

    /// Fetch the raw leaderboard payload without decoding entries
    pub async fn fetch_payload(&self) -> Result<Value, LeaderboardError> {
        let mut request = self
            .http
            .get(&self.config.api_url)
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(USER_AGENT, &self.config.user_agent)
            .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(PRAGMA, "no-cache");

        if self.config.cache_bust {
            request = request.query(&[("_", Utc::now().timestamp_millis().to_string())]);
        }

        let mut response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LeaderboardError::Status(status.as_u16()));
        }

        let limit = self.config.max_body_bytes;
        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(LeaderboardError::TooLarge { limit });
        }

        // content-length may be absent or wrong, so count while reading
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(LeaderboardError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body).map_err(|e| LeaderboardError::Parse(e.to_string()))
    }
}

#[async_trait]
impl LeaderboardPort for BagsClient {
    async fn fetch_entries(&self) -> Result<Vec<RawLeaderboardEntry>, LeaderboardError> {
        let payload = self.fetch_payload().await?;
        let (shape, entries) = decode_payload(&payload);

        match shape {
            PayloadShape::Envelope | PayloadShape::BareArray => {
                tracing::debug!("Fetched {} leaderboard entries ({:?})", entries.len(), shape);
            }
            PayloadShape::Unsuccessful => {
                tracing::warn!("Leaderboard reported success=false, treating as empty");
            }
            PayloadShape::Unrecognized => {
                tracing::warn!("Unexpected leaderboard payload shape, treating as empty");
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BagsClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_LEADERBOARD_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.cache_bust);
    }

    #[test]
    fn test_with_api_url() {
        let config = BagsClientConfig::with_api_url("http://localhost:9999/leaderboard");
        assert_eq!(config.api_url, "http://localhost:9999/leaderboard");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_client_creation() {
        let client = BagsClient::new();
        assert!(client.is_ok());
    }

    /// Serve `body` once per request on an ephemeral local port
    async fn serve_body(body: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new().route(
            "/leaderboard",
            axum::routing::get(move || {
                let body = body.clone();
                async move { body }
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        format!("http://{}/leaderboard", addr)
    }

    fn local_client(api_url: String, max_body_bytes: usize) -> BagsClient {
        BagsClient::with_config(BagsClientConfig {
            api_url,
            timeout: Duration::from_secs(5),
            max_body_bytes,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let entries: Vec<Value> = (0..200)
            .map(|i| serde_json::json!({ "name": format!("Token {}", i) }))
            .collect();
        let body = serde_json::json!({ "success": true, "response": entries }).to_string();
        let url = serve_body(body).await;

        let result = local_client(url, 256).fetch_entries().await;
        assert!(matches!(result, Err(LeaderboardError::TooLarge { limit: 256 })));
    }

    #[tokio::test]
    async fn test_body_within_limit_decoded() {
        let url = serve_body(r#"{"success":true,"response":[{"name":"Bags"}]}"#.to_string()).await;

        let entries = local_client(url, 256).fetch_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.as_deref(), Some("Bags"));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_http_error() {
        let client = BagsClient::with_config(BagsClientConfig {
            api_url: "http://127.0.0.1:1/leaderboard".to_string(),
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();

        let result = client.fetch_entries().await;
        assert!(matches!(result, Err(LeaderboardError::Http(_))));
    }
}
