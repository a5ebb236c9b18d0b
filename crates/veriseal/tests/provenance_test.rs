//! integration tests for the provenance endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, register_product, send_get, send_json, test_app};
use serde_json::json;

/// provenance attaches to the product identity and survives the token.
#[tokio::test]
async fn test_location_survives_consumption() {
    let app = test_app().await;
    let product_id = register_product(&app, "Cola-500ml", "QR-001").await;

    let response = send_json(
        &app,
        "POST",
        "/provenance/locations",
        None,
        json!({ "product_id": product_id, "location": "Berlin warehouse" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // consuming the token must not remove the sighting
    let response = send_json(&app, "POST", "/verify", None, json!({ "code": "QR-001" })).await;
    assert_eq!(body_json(response).await["status"], "consumed");

    let response = send_get(&app, "/provenance/locations?q=berlin", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let sightings = body.as_array().expect("sightings array");
    assert_eq!(sightings.len(), 1);
    assert_eq!(sightings[0]["location"], "Berlin warehouse");
}

#[tokio::test]
async fn test_blank_location_rejected() {
    let app = test_app().await;
    let product_id = register_product(&app, "Cola-500ml", "QR-001").await;

    let response = send_json(
        &app,
        "POST",
        "/provenance/locations",
        None,
        json!({ "product_id": product_id, "location": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// search matches case-insensitive substrings.
#[tokio::test]
async fn test_search_locations_case_insensitive() {
    let app = test_app().await;
    let product_id = register_product(&app, "Cola-500ml", "QR-001").await;

    for location in ["Berlin warehouse", "Hamburg port", "berlin shop"] {
        let response = send_json(
            &app,
            "POST",
            "/provenance/locations",
            None,
            json!({ "product_id": product_id, "location": location }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = send_get(&app, "/provenance/locations?q=BERLIN", None).await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().expect("sightings array").len(), 2);

    let response = send_get(&app, "/provenance/locations?q=port", None).await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().expect("sightings array").len(), 1);
}

#[tokio::test]
async fn test_rating_bounds_enforced() {
    let app = test_app().await;
    let product_id = register_product(&app, "Cola-500ml", "QR-001").await;

    for score in [0u8, 6] {
        let response = send_json(
            &app,
            "POST",
            "/provenance/ratings",
            None,
            json!({ "product_id": product_id, "score": score }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "score {}", score);
    }

    for score in [1u8, 5] {
        let response = send_json(
            &app,
            "POST",
            "/provenance/ratings",
            None,
            json!({ "product_id": product_id, "score": score }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED, "score {}", score);
    }
}

/// the average is the arithmetic mean, null when no ratings exist.
#[tokio::test]
async fn test_average_rating() {
    let app = test_app().await;
    let product_id = register_product(&app, "Cola-500ml", "QR-001").await;

    // no ratings yet
    let response = send_get(
        &app,
        &format!("/provenance/ratings/{}", product_id),
        None,
    )
    .await;
    let body = body_json(response).await;
    assert!(body["average"].is_null());
    assert_eq!(body["count"].as_u64(), Some(0));

    for score in [2u8, 3, 4] {
        let response = send_json(
            &app,
            "POST",
            "/provenance/ratings",
            None,
            json!({ "product_id": product_id, "score": score }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = send_get(
        &app,
        &format!("/provenance/ratings/{}", product_id),
        None,
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["average"].as_f64(), Some(3.0));
    assert_eq!(body["count"].as_u64(), Some(3));
}
