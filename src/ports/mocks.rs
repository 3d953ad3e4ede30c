use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::leaderboard::{LeaderboardError, LeaderboardPort};
use crate::domain::raw_entry::{decode_payload, RawLeaderboardEntry};

/// In-memory leaderboard that serves a fixed payload and counts calls
#[derive(Debug, Clone, Default)]
pub struct StaticLeaderboard {
    entries: Vec<RawLeaderboardEntry>,
    fail_with_status: Option<u16>,
    calls: Arc<AtomicUsize>,
}

impl StaticLeaderboard {
    pub fn new(entries: Vec<RawLeaderboardEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    /// Build from a raw upstream JSON payload, decoded the same way the
    /// HTTP adapter decodes it
    pub fn from_payload(payload: &serde_json::Value) -> Self {
        let (_, entries) = decode_payload(payload);
        Self::new(entries)
    }

    /// Builder method to make every fetch fail with an HTTP status
    pub fn failing(mut self, status: u16) -> Self {
        self.fail_with_status = Some(status);
        self
    }

    /// Number of fetches served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeaderboardPort for StaticLeaderboard {
    async fn fetch_entries(&self) -> Result<Vec<RawLeaderboardEntry>, LeaderboardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with_status {
            Some(status) => Err(LeaderboardError::Status(status)),
            None => Ok(self.entries.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_static_leaderboard_serves_payload() {
        let board = StaticLeaderboard::from_payload(&json!({
            "success": true,
            "response": [{ "name": "Bags" }]
        }));

        let entries = board.fetch_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(board.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_leaderboard() {
        let board = StaticLeaderboard::default().failing(503);
        let err = board.fetch_entries().await.unwrap_err();
        assert!(matches!(err, LeaderboardError::Status(503)));
        assert_eq!(board.call_count(), 1);
    }
}
