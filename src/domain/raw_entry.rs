//! Raw Leaderboard Entries
//!
//! Canonical form of an upstream leaderboard record and the tolerant decode
//! that produces it. Everything messy about the upstream payload lives here:
//! envelope vs bare array, camelCase vs snake_case aliases, numbers encoded
//! as strings, and fields of the wrong type.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// Epoch values at or above this are read as milliseconds
const EPOCH_MILLIS_CUTOFF: f64 = 1e12;

/// One upstream leaderboard record with every field optional.
///
/// Strings are `None` when absent, non-string or empty. Numbers are `None`
/// when absent, non-numeric or non-finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLeaderboardEntry {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub change_24h: Option<f64>,
    pub volume_24h: Option<f64>,
    pub total_supply: Option<f64>,
    pub image_url: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RawLeaderboardEntry {
    /// Decode a single record from an arbitrary JSON object
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            name: string_field(obj, &["name"]),
            symbol: string_field(obj, &["symbol"]),
            address: string_field(obj, &["tokenAddress", "token_address", "mint"]),
            description: string_field(obj, &["description"]),
            price: number_field(obj, &["price"]),
            market_cap: number_field(obj, &["market_cap", "marketCap"]),
            change_24h: number_field(obj, &["change_24h"]),
            volume_24h: number_field(obj, &["volume_24h"]),
            total_supply: number_field(obj, &["total_supply"]),
            image_url: string_field(obj, &["image", "image_url", "imageUrl"]),
            twitter: string_field(obj, &["twitter"]),
            telegram: string_field(obj, &["telegram"]),
            website: string_field(obj, &["website"]),
            created_at: timestamp_field(obj, &["createdAt", "created_at"]),
        }
    }

    /// Lower-cased haystacks used by search: name, symbol, upstream address
    pub fn matches_query(&self, needle_lower: &str) -> bool {
        [&self.name, &self.symbol, &self.address]
            .iter()
            .any(|field| {
                field
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(needle_lower)
            })
    }
}

/// Shape the upstream payload arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `{ "success": true, "response": [...] }`
    Envelope,
    /// `[...]`
    BareArray,
    /// `{ "success": false }`
    Unsuccessful,
    /// Anything else
    Unrecognized,
}

/// Decode the upstream payload into canonical entries.
///
/// Never fails: an unsuccessful or unrecognized payload yields zero entries,
/// and array items that are not JSON objects are skipped.
pub fn decode_payload(payload: &Value) -> (PayloadShape, Vec<RawLeaderboardEntry>) {
    let (shape, items) = match payload {
        Value::Array(items) => (PayloadShape::BareArray, Some(items)),
        Value::Object(obj) => {
            if obj.get("success").and_then(Value::as_bool) == Some(false) {
                (PayloadShape::Unsuccessful, None)
            } else {
                match obj.get("response") {
                    Some(Value::Array(items)) => (PayloadShape::Envelope, Some(items)),
                    _ => (PayloadShape::Unrecognized, None),
                }
            }
        }
        _ => (PayloadShape::Unrecognized, None),
    };

    let entries = items
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(RawLeaderboardEntry::from_object)
                .collect()
        })
        .unwrap_or_default();

    (shape, entries)
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn number_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(coerce_number)
}

/// RFC 3339 strings or unix epoch numbers (seconds or milliseconds)
fn timestamp_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| match value {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|ts| ts.with_timezone(&Utc))
                .or_else(|| coerce_number(value).and_then(from_epoch)),
            _ => coerce_number(value).and_then(from_epoch),
        })
}

fn from_epoch(n: f64) -> Option<DateTime<Utc>> {
    if n < 0.0 {
        return None;
    }
    let millis = if n >= EPOCH_MILLIS_CUTOFF { n } else { n * 1_000.0 };
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Accept JSON numbers and numeric strings, reject everything non-finite
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
