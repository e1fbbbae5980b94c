//! Endpoint tests for the lookup API.
//!
//! Handlers run against constructed state; nothing here touches the network.
//! The upstream-dependent success path short-circuits on the missing API key,
//! which is exactly the configuration failure these tests pin down.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::Json;
use sleuth_common::api::LookupRequest;
use sleuthd::config::{Config, API_KEY_ENV};
use sleuthd::routes;
use sleuthd::server::{self, AppState};
use std::sync::Arc;
use tower::ServiceExt;

fn test_state() -> Arc<AppState> {
    // Lookups must fail as unconfigured regardless of the host environment.
    std::env::remove_var(API_KEY_ENV);
    Arc::new(AppState::new(Config::default()).unwrap())
}

#[tokio::test]
async fn test_consent_missing_is_rejected() {
    let (status, Json(body)) = routes::api_lookup(
        State(test_state()),
        Json(LookupRequest {
            email: "a@b.com".to_string(),
            consent: false,
            ..Default::default()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.ok);
    assert_eq!(body.error.as_deref(), Some("Consent required."));
    assert!(body.result.is_none());
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    for email in ["not-an-email", "", "   "] {
        let (status, Json(body)) = routes::api_lookup(
            State(test_state()),
            Json(LookupRequest {
                email: email.to_string(),
                consent: true,
                ..Default::default()
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.as_deref(), Some("Please enter a valid email."));
    }
}

#[tokio::test]
async fn test_consent_is_checked_before_email() {
    let (status, Json(body)) = routes::api_lookup(
        State(test_state()),
        Json(LookupRequest {
            email: "not-an-email".to_string(),
            consent: false,
            ..Default::default()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error.as_deref(), Some("Consent required."));
}

#[tokio::test]
async fn test_missing_api_key_surfaces_as_server_error() {
    let (status, Json(body)) = routes::api_lookup(
        State(test_state()),
        Json(LookupRequest {
            email: "a@b.com".to_string(),
            consent: true,
            ..Default::default()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.ok);
    assert_eq!(
        body.error.as_deref(),
        Some("IntelBase API key is not configured")
    );
}

#[tokio::test]
async fn test_health_reports_version_and_uptime() {
    let Json(health) = routes::health_check(State(test_state())).await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_full_router_returns_json_envelope() {
    let app = server::router(test_state());

    let request = Request::builder()
        .method("POST")
        .uri("/api/lookup")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"email":"a@b.com","consent":false}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Consent required.");
}

#[tokio::test]
async fn test_index_page_is_served() {
    let app = server::router(test_state());

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("mailsleuth"));
}
