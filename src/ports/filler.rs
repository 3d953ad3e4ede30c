//! Filler port
//!
//! Values the leaderboard never reports (24h change, token age) are
//! synthesized from the entry's position so repeated polls of an unchanged
//! leaderboard render identically.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bound of the synthesized 24h change, in percent
pub const CHANGE_FILLER_BOUND_PCT: f64 = 10.0;

const HOUR_SECS: i64 = 3_600;
const DAY_SECS: i64 = 86_400;

/// Age hash modulus; one full cycle is split 60/30/10 across the buckets
pub const AGE_CYCLE: usize = 8_640;
const AGE_MULTIPLIER: usize = 7_919;
const AGE_OFFSET: usize = 2_837;
const RECENT_BUCKET_END: usize = 5_184;
const WEEK_BUCKET_END: usize = 7_776;

/// Source of index-seeded filler values
pub trait FillerSource: Send + Sync {
    /// 24h change in `[-CHANGE_FILLER_BOUND_PCT, CHANGE_FILLER_BOUND_PCT]`
    fn change_24h(&self, index: usize) -> f64;

    /// Apparent age of the entry at `index`, never negative
    fn age(&self, index: usize) -> Duration;
}

/// Deterministic filler keyed by a run seed and the entry index
#[derive(Debug, Clone, Copy)]
pub struct SeededFiller {
    seed: u64,
}

impl SeededFiller {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, index: usize) -> StdRng {
        // splitmix-style spread so neighbouring indices get unrelated streams
        let mixed = self
            .seed
            .wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        StdRng::seed_from_u64(mixed)
    }
}

impl Default for SeededFiller {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FillerSource for SeededFiller {
    fn change_24h(&self, index: usize) -> f64 {
        self.rng_for(index)
            .gen_range(-CHANGE_FILLER_BOUND_PCT..=CHANGE_FILLER_BOUND_PCT)
    }

    fn age(&self, index: usize) -> Duration {
        recency_biased_age(index)
    }
}

/// Recency-biased age for an index.
///
/// 60% of a cycle lands in the last 24h (whole hours), 30% between 1 and 7
/// days, 10% between 7 and 30 days.
pub fn recency_biased_age(index: usize) -> Duration {
    let seed = (index % AGE_CYCLE * AGE_MULTIPLIER + AGE_OFFSET) % AGE_CYCLE;

    let secs = if seed < RECENT_BUCKET_END {
        (seed / 216) as i64 * HOUR_SECS
    } else if seed < WEEK_BUCKET_END {
        DAY_SECS + (seed - RECENT_BUCKET_END) as i64 * 200
    } else {
        7 * DAY_SECS + (seed - WEEK_BUCKET_END) as i64 * 2_300
    };

    Duration::seconds(secs)
}
