//! Domain Layer - Core types for the bagsdex token feed
//!
//! This module contains pure domain types and logic with no external dependencies.
//! All external interactions happen through the ports layer.
//!
//! - `token`: the normalized `Token` record, status thresholds and filters
//! - `raw_entry`: canonical upstream record and the tolerant payload decode

pub mod token;
pub mod raw_entry;

pub use token::{
    format_compact, is_bonded, Socials, StatusFilter, Token, TokenStatus, UnknownStatusFilter,
    ASSUMED_SUPPLY, BOND_THRESHOLD_USD, MOONING_THRESHOLD_USD,
};
pub use raw_entry::{decode_payload, PayloadShape, RawLeaderboardEntry};
