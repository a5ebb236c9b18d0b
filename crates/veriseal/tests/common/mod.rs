//! shared helpers for integration tests.

// not every test binary uses every helper
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;
use veriseal::{create_app, handlers};
use veriseal_db::VerisealDb;
use veriseal_types::Config;

/// the admin bearer token used by tests.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// build an app with an in-memory database and the admin surface enabled.
pub async fn test_app() -> Router {
    let db = VerisealDb::new_in_memory()
        .await
        .expect("failed to create in-memory database");
    let mut config = Config::default();
    config.admin.token_hash = Some(handlers::hash_token(ADMIN_TOKEN));
    create_app(db, config, None)
}

/// build an app with no admin token configured.
pub async fn test_app_no_admin() -> Router {
    let db = VerisealDb::new_in_memory()
        .await
        .expect("failed to create in-memory database");
    create_app(db, Config::default(), None)
}

/// send a json request and return the response.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request");
    app.clone().oneshot(request).await.expect("request failed")
}

/// send a bodyless GET request and return the response.
pub async fn send_get(app: &Router, uri: &str, bearer: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).expect("failed to build request");
    app.clone().oneshot(request).await.expect("request failed")
}

/// read the response body as json.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse response body")
}

/// register a product through the admin endpoint and return its id.
pub async fn register_product(app: &Router, name: &str, token: &str) -> u64 {
    let response = send_json(
        app,
        "POST",
        "/admin/products",
        Some(ADMIN_TOKEN),
        serde_json::json!({ "name": name, "token": token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["product"]["id"].as_u64().expect("product id")
}
