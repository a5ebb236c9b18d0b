//! handlers for provenance attachment and queries.
//!
//! attachment takes a product identity, not a token: by the time a user
//! submits a location or rating, the token that proved authenticity is
//! already consumed. the caller is responsible for only submitting
//! product ids obtained from a successful verification; no token
//! re-check happens here.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use veriseal_types::{LocationSighting, ProductId, Rating, Score};

use super::ApiError;
use crate::AppState;
use veriseal_db::Database;

/// request body for attaching a location sighting.
#[derive(Debug, Deserialize)]
pub struct AttachLocationRequest {
    /// product identity from a successful verification.
    pub product_id: u64,
    /// free-text location. must not be blank.
    pub location: String,
}

/// POST /provenance/locations - append a location sighting.
pub async fn attach_location(
    State(state): State<AppState>,
    Json(request): Json<AttachLocationRequest>,
) -> Result<(StatusCode, Json<LocationSighting>), ApiError> {
    let sighting = state
        .db
        .add_location(ProductId(request.product_id), &request.location)
        .await?;
    Ok((StatusCode::CREATED, Json(sighting)))
}

/// request body for attaching a rating.
#[derive(Debug, Deserialize)]
pub struct AttachRatingRequest {
    /// product identity from a successful verification.
    pub product_id: u64,
    /// rating score. validated against the 1..=5 range.
    pub score: u8,
}

/// POST /provenance/ratings - append a rating.
pub async fn attach_rating(
    State(state): State<AppState>,
    Json(request): Json<AttachRatingRequest>,
) -> Result<(StatusCode, Json<Rating>), ApiError> {
    let score = Score::new(request.score).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let rating = state
        .db
        .add_rating(ProductId(request.product_id), score)
        .await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// query parameters for location search.
#[derive(Debug, Deserialize)]
pub struct SearchLocationsQuery {
    /// case-insensitive substring to match against sighting locations.
    pub q: String,
}

/// GET /provenance/locations?q=substr - search sightings by location.
pub async fn search_locations(
    State(state): State<AppState>,
    Query(query): Query<SearchLocationsQuery>,
) -> Result<Json<Vec<LocationSighting>>, ApiError> {
    let sightings = state.db.search_locations(&query.q).await?;
    Ok(Json(sightings))
}

/// response for the average rating endpoint.
#[derive(Debug, Serialize)]
pub struct RatingSummary {
    /// arithmetic mean of all ratings; null when no ratings exist.
    pub average: Option<f64>,
    /// number of ratings contributing to the mean.
    pub count: usize,
}

/// GET /provenance/ratings/{product_id} - average rating for a product.
///
/// a product with no ratings reports `average: null`, never 0.
pub async fn product_rating(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
) -> Result<Json<RatingSummary>, ApiError> {
    let ratings = state.db.list_ratings(ProductId(product_id)).await?;
    let average = if ratings.is_empty() {
        None
    } else {
        let sum: u32 = ratings.iter().map(|r| u32::from(r.score.value())).sum();
        Some(f64::from(sum) / ratings.len() as f64)
    };
    Ok(Json(RatingSummary {
        average,
        count: ratings.len(),
    }))
}
