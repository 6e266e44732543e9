//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tenpin_core::clock::Clock;
use tenpin_event_store::in_memory_event_repository::InMemoryEventRepository;
use tenpin_test_support::FixedClock;
use tower::ServiceExt;
use uuid::Uuid;

use tenpin_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over a fresh `InMemoryEventRepository`.
///
/// The router is cheap to clone and every clone shares the same store.
pub fn build_test_app() -> Router {
    let event_repository = Arc::new(InMemoryEventRepository::new());
    tenpin_api::app(AppState::new(fixed_clock(), event_repository))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Create a game and return its ID.
pub async fn create_game(app: &Router) -> Uuid {
    let (status, json) = post_empty(app.clone(), "/api/v1/games").await;
    assert_eq!(status, StatusCode::OK);
    Uuid::parse_str(json["game_id"].as_str().unwrap()).unwrap()
}

/// Record each roll in order, asserting every one is accepted.
pub async fn roll_all(app: &Router, game_id: Uuid, rolls: &[i64]) {
    for &pins in rolls {
        let (status, json) = post_json(
            app.clone(),
            &format!("/api/v1/games/{game_id}/rolls"),
            &serde_json::json!({ "pins": pins }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "roll {pins} rejected: {json}");
    }
}
