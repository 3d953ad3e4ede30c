//! API routes
//!
//! `/api/tokens` and `/api/search` both answer GET with a JSON token array,
//! OPTIONS with an empty 200, and anything else with a 405 envelope.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, EXPIRES, PRAGMA};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use super::error::ApiError;
use crate::application::TokenService;
use crate::domain::StatusFilter;

const NO_STORE: &str = "no-cache, no-store, must-revalidate";

/// Shared handler state
pub struct AppState {
    pub service: TokenService,
}

#[derive(Debug, Default, Deserialize)]
pub struct TokensParams {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Build the API router
pub fn create_router(service: TokenService, cors_enabled: bool) -> Router {
    let state = Arc::new(AppState { service });

    let router = Router::new()
        .route(
            "/api/tokens",
            get(list_tokens).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/api/search",
            get(search_tokens).options(preflight).fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .with_state(state);

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn list_tokens(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TokensParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let filter = params
        .status
        .as_deref()
        .unwrap_or("all")
        .parse::<StatusFilter>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let tokens = state.service.list_tokens(filter).await;
    json_no_store(&tokens)
}

async fn search_tokens(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let needle = params.q.unwrap_or_default();
    let tokens = state.service.search_tokens(&needle).await;
    json_no_store(&tokens)
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn health_check() -> &'static str {
    "OK"
}

/// Serialize `body` with caching disabled
fn json_no_store<T: Serialize>(body: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [
            (CONTENT_TYPE, "application/json"),
            (CACHE_CONTROL, NO_STORE),
            (PRAGMA, "no-cache"),
            (EXPIRES, "0"),
        ],
        bytes,
    )
        .into_response())
}
