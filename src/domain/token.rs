//! Token
//!
//! The normalized token record served to the UI, plus the status
//! thresholds every record is derived against.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Market cap above which a token counts as bonded (graduated)
pub const BOND_THRESHOLD_USD: f64 = 75_000.0;

/// Market cap at which a token is considered mooning
pub const MOONING_THRESHOLD_USD: f64 = 1_000_000.0;

/// Supply assumed when upstream does not report one
pub const ASSUMED_SUPPLY: f64 = 1_000_000_000.0;

/// Coarse lifecycle status of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    New,
    Bonded,
}

impl TokenStatus {
    /// Derive the status from a market cap
    pub fn from_market_cap(market_cap: f64) -> Self {
        if is_bonded(market_cap) {
            TokenStatus::Bonded
        } else {
            TokenStatus::New
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStatus::New => "new",
            TokenStatus::Bonded => "bonded",
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold test shared by `status`, `isBonded` and `hasReached75k`
pub fn is_bonded(market_cap: f64) -> bool {
    market_cap > BOND_THRESHOLD_USD
}

/// Social links reported upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Socials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

impl Socials {
    /// Build socials from optional links, `None` when no link is present
    pub fn from_links(
        website: Option<String>,
        twitter: Option<String>,
        telegram: Option<String>,
    ) -> Option<Self> {
        let socials = Self { website, twitter, telegram };
        if socials.is_empty() {
            None
        } else {
            Some(socials)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.website.is_none() && self.twitter.is_none() && self.telegram.is_none()
    }
}

/// Normalized token as rendered by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub market_cap: f64,
    pub price: f64,
    pub change_24h: f64,
    pub volume_24h: f64,
    pub total_supply: f64,
    pub status: TokenStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub mint: String,
    pub contract_address: String,
    #[serde(rename = "hasReached75k")]
    pub has_reached_75k: bool,
    pub is_bonded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socials: Option<Socials>,
}

impl Token {
    /// Check that the redundant status fields agree with the market cap
    pub fn status_consistent(&self) -> bool {
        let bonded = is_bonded(self.market_cap);
        self.is_bonded == bonded
            && self.has_reached_75k == bonded
            && (self.status == TokenStatus::Bonded) == bonded
    }

    pub fn is_mooning(&self) -> bool {
        self.market_cap >= MOONING_THRESHOLD_USD
    }
}

// JS-style ISO-8601 with millisecond precision and a `Z` suffix
fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Status filter offered by the listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    New,
    Bonded,
    Mooning,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown status filter: {0} (expected all, new, bonded or mooning)")]
pub struct UnknownStatusFilter(pub String);

impl StatusFilter {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::New => token.status == TokenStatus::New,
            StatusFilter::Bonded => token.status == TokenStatus::Bonded,
            StatusFilter::Mooning => token.is_mooning(),
        }
    }

    /// Keep only the tokens passing this filter, preserving order
    pub fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        if *self == StatusFilter::All {
            return tokens;
        }
        tokens.into_iter().filter(|t| self.matches(t)).collect()
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatusFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "new" => Ok(StatusFilter::New),
            "bonded" => Ok(StatusFilter::Bonded),
            "mooning" => Ok(StatusFilter::Mooning),
            _ => Err(UnknownStatusFilter(s.to_string())),
        }
    }
}

/// Compact number format used by the token cards (`1.23M`, `4.5K`, `12.34`)
pub fn format_compact(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}
