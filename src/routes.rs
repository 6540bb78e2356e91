use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::auth::{self, ApiKey, API_KEY_SCHEME};
use crate::error::AppError;

const PREVIEW_CHARS: usize = 4;

// ──────────────────────────────────────────────
// Response types
// ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct CredentialResponse {
    pub scheme: &'static str,
    pub length: usize,
    pub preview: String,
}

// ──────────────────────────────────────────────
// Handlers
// ──────────────────────────────────────────────

pub async fn health() -> &'static str {
    "ok"
}

/// Describes the key the caller authenticated with, without echoing it back.
pub async fn describe_credential(ApiKey(key): ApiKey) -> Json<CredentialResponse> {
    Json(CredentialResponse {
        scheme: API_KEY_SCHEME,
        length: key.chars().count(),
        preview: mask(&key),
    })
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

fn mask(key: &str) -> String {
    if key.chars().count() <= PREVIEW_CHARS {
        return "…".to_string();
    }
    let head: String = key.chars().take(PREVIEW_CHARS).collect();
    format!("{head}…")
}

pub fn router() -> Router {
    // Public API routes (no auth required)
    let public_api = Router::new().route("/api/health", get(health));

    // Protected API routes (auth required)
    let protected_api = Router::new()
        .route("/api/credential", get(describe_credential))
        .route_layer(middleware::from_fn(auth::require_api_key));

    Router::new()
        .merge(public_api)
        .merge(protected_api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}
