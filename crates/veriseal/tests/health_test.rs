//! integration tests for the `/health` endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, send_get, test_app};

#[tokio::test]
async fn test_health_returns_pass() {
    let app = test_app().await;

    let response = send_get(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .expect("should have content-type header")
        .to_str()
        .expect("content-type should be valid string");
    assert!(
        content_type.contains("application/health+json"),
        "content-type should be application/health+json, got: {}",
        content_type
    );

    let body = body_json(response).await;
    assert_eq!(body["status"], "pass");
}
