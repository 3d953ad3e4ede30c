//! Token Normalizer
//!
//! Turns raw leaderboard entries into display-ready tokens:
//! filter by query, resolve address, enrich, sort newest first, truncate.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    is_bonded, RawLeaderboardEntry, Socials, Token, TokenStatus, ASSUMED_SUPPLY,
};
use crate::ports::{Clock, FillerSource};

/// Default listing page size
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Estimated daily volume as a fraction of market cap
pub const VOLUME_ESTIMATE_RATIO: f64 = 0.1;

/// Normalization pipeline shared by the listing and search paths
#[derive(Clone)]
pub struct TokenPipeline {
    page_size: usize,
    clock: Arc<dyn Clock>,
    filler: Arc<dyn FillerSource>,
}

impl std::fmt::Debug for TokenPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPipeline")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl TokenPipeline {
    pub fn new(page_size: usize, clock: Arc<dyn Clock>, filler: Arc<dyn FillerSource>) -> Self {
        Self {
            page_size,
            clock,
            filler,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Normalize every entry, or only those matching `query` when given.
    ///
    /// A blank query means no search was performed and yields nothing.
    pub fn normalize(&self, entries: &[RawLeaderboardEntry], query: Option<&str>) -> Vec<Token> {
        let selected: Vec<&RawLeaderboardEntry> = match query {
            None => entries.iter().collect(),
            Some(query) => {
                let needle = query.trim().to_lowercase();
                if needle.is_empty() {
                    return Vec::new();
                }
                entries.iter().filter(|e| e.matches_query(&needle)).collect()
            }
        };

        let now = self.clock.now();
        let mut tokens: Vec<Token> = selected
            .into_iter()
            .enumerate()
            .map(|(index, entry)| self.enrich(index, entry, now))
            .collect();

        sort_tokens(&mut tokens);
        tokens
    }

    /// Listing adapter: every entry, capped to the page size
    pub fn listing(&self, entries: &[RawLeaderboardEntry]) -> Vec<Token> {
        let mut tokens = self.normalize(entries, None);
        tokens.truncate(self.page_size);
        tokens
    }

    /// Search adapter: matching entries, uncapped
    pub fn search(&self, entries: &[RawLeaderboardEntry], query: &str) -> Vec<Token> {
        self.normalize(entries, Some(query))
    }

    fn enrich(&self, index: usize, entry: &RawLeaderboardEntry, now: DateTime<Utc>) -> Token {
        let address = entry
            .address
            .clone()
            .unwrap_or_else(|| format!("token-{}", index));

        let price = entry.price.unwrap_or(0.0);
        let market_cap = finite_or_zero(entry.market_cap.unwrap_or(price * ASSUMED_SUPPLY));
        let total_supply = entry.total_supply.unwrap_or(ASSUMED_SUPPLY);
        let volume_24h = finite_or_zero(
            entry
                .volume_24h
                .unwrap_or(market_cap * VOLUME_ESTIMATE_RATIO),
        );
        let change_24h = entry
            .change_24h
            .unwrap_or_else(|| self.filler.change_24h(index));

        let bonded = is_bonded(market_cap);

        let created_at = entry
            .created_at
            .unwrap_or_else(|| now - self.filler.age(index))
            .min(now);

        let name = entry
            .name
            .clone()
            .unwrap_or_else(|| format!("Token {}", index + 1));
        let symbol = entry
            .symbol
            .clone()
            .unwrap_or_else(|| format!("TKN{}", index));
        let description = entry
            .description
            .clone()
            .unwrap_or_else(|| format!("{} token launched on bags.fm", name));

        Token {
            id: address.clone(),
            name,
            symbol,
            description,
            market_cap,
            price,
            change_24h,
            volume_24h,
            total_supply,
            status: TokenStatus::from_market_cap(market_cap),
            image_url: entry.image_url.clone(),
            created_at,
            mint: address.clone(),
            contract_address: address,
            has_reached_75k: bonded,
            is_bonded: bonded,
            socials: Socials::from_links(
                entry.website.clone(),
                entry.twitter.clone(),
                entry.telegram.clone(),
            ),
        }
    }
}

// Derived values can overflow even when every upstream number is finite
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Newest first, then highest market cap. Stable for equal keys.
pub fn sort_tokens(tokens: &mut [Token]) {
    tokens.sort_by(compare_for_display);
}

fn compare_for_display(a: &Token, b: &Token) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.market_cap.total_cmp(&a.market_cap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SeededFiller};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap()
    }

    fn pipeline(page_size: usize) -> TokenPipeline {
        TokenPipeline::new(
            page_size,
            Arc::new(FixedClock(now())),
            Arc::new(SeededFiller::new(7)),
        )
    }

    /// Filler with scripted ages, for pinning sort order
    struct ScriptedAges(Vec<Duration>);

    impl FillerSource for ScriptedAges {
        fn change_24h(&self, _index: usize) -> f64 {
            0.0
        }

        fn age(&self, index: usize) -> Duration {
            self.0[index]
        }
    }

    fn entry(name: &str, symbol: &str, address: &str) -> RawLeaderboardEntry {
        RawLeaderboardEntry {
            name: Some(name.to_string()),
            symbol: Some(symbol.to_string()),
            address: Some(address.to_string()),
            ..Default::default()
        }
    }

    fn with_market_cap(mut e: RawLeaderboardEntry, market_cap: f64) -> RawLeaderboardEntry {
        e.market_cap = Some(market_cap);
        e
    }

    #[test]
    fn test_status_fields_agree_with_market_cap() {
        let entries: Vec<RawLeaderboardEntry> = [0.0, 50_000.0, 75_000.0, 75_001.0, 3_000_000.0]
            .iter()
            .map(|mc| with_market_cap(RawLeaderboardEntry::default(), *mc))
            .chain([RawLeaderboardEntry {
                price: Some(0.0001),
                ..Default::default()
            }])
            .collect();

        let tokens = pipeline(DEFAULT_PAGE_SIZE).normalize(&entries, None);
        assert_eq!(tokens.len(), entries.len());
        for token in &tokens {
            assert!(token.status_consistent(), "inconsistent: {:?}", token);
        }
    }

    #[test]
    fn test_ids_agree_and_are_never_empty() {
        let entries = vec![
            entry("Bags", "BAGS", "BagsMint"),
            RawLeaderboardEntry::default(),
            RawLeaderboardEntry::default(),
        ];

        let tokens = pipeline(DEFAULT_PAGE_SIZE).normalize(&entries, None);
        for token in &tokens {
            assert!(!token.id.is_empty());
            assert_eq!(token.id, token.mint);
            assert_eq!(token.mint, token.contract_address);
        }

        let mut ids: Vec<&str> = tokens.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["BagsMint", "token-1", "token-2"]);
    }

    #[test]
    fn test_empty_entry_fully_populated() {
        let tokens = pipeline(DEFAULT_PAGE_SIZE).normalize(&[RawLeaderboardEntry::default()], None);
        let token = &tokens[0];

        assert_eq!(token.id, "token-0");
        assert_eq!(token.name, "Token 1");
        assert_eq!(token.symbol, "TKN0");
        assert_eq!(token.description, "Token 1 token launched on bags.fm");
        assert_eq!(token.price, 0.0);
        assert_eq!(token.market_cap, 0.0);
        assert_eq!(token.volume_24h, 0.0);
        assert_eq!(token.total_supply, ASSUMED_SUPPLY);
        assert!(token.change_24h.is_finite());
        assert!((-10.0..=10.0).contains(&token.change_24h));
        assert_eq!(token.status, TokenStatus::New);
        assert!(token.socials.is_none());
        assert!(token.image_url.is_none());
        assert!(token.created_at <= now());
    }

    #[test]
    fn test_overflowing_derived_values_fall_back_to_zero() {
        let tokens = pipeline(DEFAULT_PAGE_SIZE).normalize(
            &[RawLeaderboardEntry {
                price: Some(1e300),
                ..Default::default()
            }],
            None,
        );
        let token = &tokens[0];

        assert_eq!(token.price, 1e300);
        assert_eq!(token.market_cap, 0.0);
        assert_eq!(token.volume_24h, 0.0);
        assert_eq!(token.status, TokenStatus::New);
        assert!(token.status_consistent());

        let json = serde_json::to_value(token).unwrap();
        assert_eq!(json["marketCap"], 0.0);
        assert_eq!(json["volume24h"], 0.0);
    }

    #[test]
    fn test_market_cap_derived_from_price() {
        let tokens = pipeline(DEFAULT_PAGE_SIZE).normalize(
            &[RawLeaderboardEntry {
                price: Some(0.0002),
                ..Default::default()
            }],
            None,
        );

        let token = &tokens[0];
        assert!((token.market_cap - 200_000.0).abs() < 1e-6);
        assert!((token.volume_24h - 20_000.0).abs() < 1e-6);
        assert_eq!(token.status, TokenStatus::Bonded);
    }

    #[test]
    fn test_upstream_values_win() {
        let raw = RawLeaderboardEntry {
            price: Some(0.5),
            market_cap: Some(10_000.0),
            change_24h: Some(-42.0),
            volume_24h: Some(123.0),
            total_supply: Some(21_000_000.0),
            description: Some("Upstream description".into()),
            image_url: Some("https://img/bags.png".into()),
            twitter: Some("https://twitter.com/bagsfm".into()),
            ..entry("Bags", "BAGS", "BagsMint")
        };

        let token = &pipeline(DEFAULT_PAGE_SIZE).normalize(&[raw], None)[0];
        assert_eq!(token.market_cap, 10_000.0);
        assert_eq!(token.change_24h, -42.0);
        assert_eq!(token.volume_24h, 123.0);
        assert_eq!(token.total_supply, 21_000_000.0);
        assert_eq!(token.description, "Upstream description");
        assert_eq!(token.image_url.as_deref(), Some("https://img/bags.png"));

        let socials = token.socials.as_ref().unwrap();
        assert_eq!(socials.twitter.as_deref(), Some("https://twitter.com/bagsfm"));
        assert!(socials.website.is_none());
        assert!(socials.telegram.is_none());
    }

    #[test]
    fn test_upstream_created_at_clamped_to_now() {
        let future = RawLeaderboardEntry {
            created_at: Some(now() + Duration::hours(3)),
            ..Default::default()
        };
        let past = RawLeaderboardEntry {
            created_at: Some(now() - Duration::days(2)),
            ..Default::default()
        };

        let tokens = pipeline(DEFAULT_PAGE_SIZE).normalize(&[future, past], None);
        assert_eq!(tokens[0].created_at, now());
        assert_eq!(tokens[1].created_at, now() - Duration::days(2));
    }

    #[test]
    fn test_sort_newest_then_market_cap() {
        let ages = vec![Duration::hours(1), Duration::hours(1), Duration::hours(2)];
        let pipeline = TokenPipeline::new(
            DEFAULT_PAGE_SIZE,
            Arc::new(FixedClock(now())),
            Arc::new(ScriptedAges(ages)),
        );

        let entries = vec![
            with_market_cap(entry("A", "A", "a"), 5.0),
            with_market_cap(entry("B", "B", "b"), 10.0),
            with_market_cap(entry("C", "C", "c"), 5.0),
        ];

        let order: Vec<String> = pipeline
            .normalize(&entries, None)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let pipeline = TokenPipeline::new(
            DEFAULT_PAGE_SIZE,
            Arc::new(FixedClock(now())),
            Arc::new(ScriptedAges(vec![Duration::hours(4); 3])),
        );
        let entries = vec![
            with_market_cap(entry("A", "A", "first"), 7.0),
            with_market_cap(entry("B", "B", "second"), 7.0),
            with_market_cap(entry("C", "C", "third"), 7.0),
        ];

        let order: Vec<String> = pipeline
            .normalize(&entries, None)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let entries: Vec<RawLeaderboardEntry> = (0..25)
            .map(|i| with_market_cap(entry(&format!("T{}", i), "T", &format!("addr{}", i)), i as f64 * 1_000.0))
            .collect();

        let p = pipeline(DEFAULT_PAGE_SIZE);
        assert_eq!(p.normalize(&entries, None), p.normalize(&entries, None));
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let entries = vec![
            entry("Bags", "BAGS", "Mint1"),
            entry("Moon", "MOON", "Mint2"),
            entry("Other", "OTH", "xBAGx"),
        ];

        let tokens = pipeline(DEFAULT_PAGE_SIZE).search(&entries, "  bag ");
        let mut ids: Vec<String> = tokens.into_iter().map(|t| t.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["Mint1", "xBAGx"]);

        assert!(pipeline(DEFAULT_PAGE_SIZE).search(&entries, "zzz").is_empty());
    }

    #[test]
    fn test_search_ids_use_filtered_index() {
        let entries = vec![
            RawLeaderboardEntry::default(),
            RawLeaderboardEntry {
                name: Some("Bags".into()),
                ..Default::default()
            },
        ];

        let tokens = pipeline(DEFAULT_PAGE_SIZE).search(&entries, "bags");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].id, "token-0");
    }

    #[test]
    fn test_blank_query_yields_nothing() {
        let entries = vec![entry("Bags", "BAGS", "Mint1")];
        let p = pipeline(DEFAULT_PAGE_SIZE);

        assert!(p.search(&entries, "").is_empty());
        assert!(p.search(&entries, "   \t").is_empty());
        assert_eq!(p.normalize(&entries, None).len(), 1);
    }

    #[test]
    fn test_listing_capped_search_uncapped() {
        let entries: Vec<RawLeaderboardEntry> = (0..12)
            .map(|i| entry("Bags", "BAGS", &format!("mint{}", i)))
            .collect();

        let p = pipeline(5);
        assert_eq!(p.listing(&entries).len(), 5);
        assert_eq!(p.search(&entries, "bags").len(), 12);
    }

    #[test]
    fn test_empty_input() {
        let p = pipeline(DEFAULT_PAGE_SIZE);
        assert!(p.listing(&[]).is_empty());
        assert!(p.search(&[], "bags").is_empty());
    }
}
