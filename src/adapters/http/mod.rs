//! HTTP Adapter
//!
//! axum front end for the token service:
//! - `GET /api/tokens[?status=all|new|bonded|mooning]`
//! - `GET /api/search?q=<query>`
//! - `GET /health`

mod error;
mod routes;
mod server;

pub use error::ApiError;
pub use routes::{create_router, AppState, SearchParams, TokensParams};
pub use server::{bind, start_server, ServerError};
