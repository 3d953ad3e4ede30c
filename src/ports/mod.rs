//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - The upstream leaderboard feed
//! - Wall-clock time
//! - Index-seeded filler values for fields upstream never reports

pub mod leaderboard;
pub mod clock;
pub mod filler;
pub mod mocks;

pub use leaderboard::{LeaderboardError, LeaderboardPort};
pub use clock::{Clock, FixedClock, SystemClock};
pub use filler::{FillerSource, SeededFiller};
pub use mocks::StaticLeaderboard;
