//! Application Layer - Use cases over the ports

pub mod token_service;

pub use token_service::{ListingSource, TokenService};
