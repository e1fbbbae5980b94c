//! API routes for sleuthd.

use crate::intelbase::LookupOptions;
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use sleuth_common::api::{HealthResponse, LookupRequest, LookupResponse};
use sleuth_common::normalize::normalize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

const INDEX_HTML: &str = include_str!("../assets/index.html");

// ============================================================================
// Page Routes
// ============================================================================

pub fn page_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ============================================================================
// Lookup Routes
// ============================================================================

pub fn lookup_routes() -> Router<AppStateArc> {
    Router::new().route("/api/lookup", post(api_lookup))
}

pub async fn api_lookup(
    State(state): State<AppStateArc>,
    Json(req): Json<LookupRequest>,
) -> (StatusCode, Json<LookupResponse>) {
    let email = req.email.trim().to_string();

    // Consent gate to discourage misuse. Checked before anything else.
    if !req.consent {
        return (
            StatusCode::BAD_REQUEST,
            Json(LookupResponse::failure("Consent required.")),
        );
    }

    if email.is_empty() || !email.contains('@') {
        return (
            StatusCode::BAD_REQUEST,
            Json(LookupResponse::failure("Please enter a valid email.")),
        );
    }

    let opts = LookupOptions {
        include_data_breaches: req.include_data_breaches,
        timeout_ms: req
            .timeout_ms
            .unwrap_or(state.config.intelbase.default_timeout_ms),
        exclude_modules: None,
    };

    let start = Instant::now();
    match state.intelbase.lookup(&email, &opts).await {
        Ok(raw) => {
            let result = normalize(&raw);
            info!(
                "Lookup for {} done in {}ms: {} cards, {} breaches",
                email,
                start.elapsed().as_millis(),
                result.cards.len(),
                result.breach_count
            );
            (StatusCode::OK, Json(LookupResponse::success(result)))
        }
        Err(e) => {
            error!("Lookup for {} failed: {}", email, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LookupResponse::failure(e.to_string())),
            )
        }
    }
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

pub async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
