//! handlers for the /verify and /scan endpoints.

use axum::{Json, body::Bytes, extract::State};
use serde::Deserialize;
use veriseal_types::VerifyOutcome;

use super::ApiError;
use crate::AppState;
use crate::engine::VerificationEngine;

/// request body for /verify.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// the decoded QR payload. null/absent when the client's decoder
    /// found no readable symbol.
    #[serde(default)]
    pub code: Option<String>,
}

/// POST /verify - verify a decoded payload and consume the token.
///
/// a rejection is a normal 200 response, not an http error: the request
/// itself succeeded, the code just isn't an active token. the response
/// never distinguishes "never registered" from "already used".
pub async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyOutcome>, ApiError> {
    let engine = VerificationEngine::new(state.db.clone());
    let outcome = engine.verify(request.code.as_deref()).await?;
    Ok(Json(outcome))
}

/// POST /scan - decode a raw image and verify the result.
///
/// body is the raw image bytes; decoding runs through the configured
/// external decoder collaborator.
pub async fn scan(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<VerifyOutcome>, ApiError> {
    let engine = VerificationEngine::new(state.db.clone());
    let outcome = engine.verify_image(state.decoder.as_ref(), &body).await?;
    Ok(Json(outcome))
}
