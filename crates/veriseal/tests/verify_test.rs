//! integration tests for the `/verify` and `/scan` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, register_product, send_json, test_app};
use serde_json::json;

/// a registered token verifies exactly once; the second attempt is
/// rejected without revealing whether the code ever existed.
#[tokio::test]
async fn test_token_verifies_exactly_once() {
    let app = test_app().await;
    register_product(&app, "Cola-500ml", "QR-001").await;

    let response = send_json(&app, "POST", "/verify", None, json!({ "code": "QR-001" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "consumed");
    assert_eq!(body["product"]["name"], "Cola-500ml");

    // replay of the same code
    let response = send_json(&app, "POST", "/verify", None, json!({ "code": "QR-001" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["reason"], "invalid_code");
}

/// an unregistered code gets the same rejection as a replayed one.
#[tokio::test]
async fn test_unknown_code_rejected() {
    let app = test_app().await;

    let response = send_json(&app, "POST", "/verify", None, json!({ "code": "never-seen" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["reason"], "invalid_code");
}

/// a null or absent code means the client's decoder found nothing.
#[tokio::test]
async fn test_missing_code_is_no_symbol() {
    let app = test_app().await;

    let response = send_json(&app, "POST", "/verify", None, json!({ "code": null })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["reason"], "no_symbol_detected");

    let response = send_json(&app, "POST", "/verify", None, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "no_symbol_detected");
}

/// blank codes never reach the store; they read as unreadable symbols.
#[tokio::test]
async fn test_blank_code_is_no_symbol() {
    let app = test_app().await;

    let response = send_json(&app, "POST", "/verify", None, json!({ "code": "   " })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["reason"], "no_symbol_detected");
}

/// with no decoder collaborator configured, /scan reports every image
/// as unreadable rather than erroring.
#[tokio::test]
async fn test_scan_without_decoder_reports_no_symbol() {
    let app = test_app().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/scan")
        .header("content-type", "application/octet-stream")
        .body(axum::body::Body::from(vec![0xffu8, 0xd8, 0xff]))
        .expect("failed to build request");
    let response = tower::ServiceExt::oneshot(app.clone(), request)
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["reason"], "no_symbol_detected");
}

/// full lifecycle: register, verify, replay, rate, read the average.
#[tokio::test]
async fn test_full_lifecycle() {
    let app = test_app().await;
    let product_id = register_product(&app, "Cola-500ml", "QR-001").await;

    // first scan consumes the token
    let response = send_json(&app, "POST", "/verify", None, json!({ "code": "QR-001" })).await;
    let body = body_json(response).await;
    assert_eq!(body["status"], "consumed");
    assert_eq!(body["product"]["id"].as_u64(), Some(product_id));

    // second scan is rejected
    let response = send_json(&app, "POST", "/verify", None, json!({ "code": "QR-001" })).await;
    let body = body_json(response).await;
    assert_eq!(body["status"], "rejected");

    // rate the verified product
    let response = send_json(
        &app,
        "POST",
        "/provenance/ratings",
        None,
        json!({ "product_id": product_id, "score": 4 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // the average reflects the single rating
    let response = common::send_get(
        &app,
        &format!("/provenance/ratings/{}", product_id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["average"].as_f64(), Some(4.0));
    assert_eq!(body["count"].as_u64(), Some(1));
}
