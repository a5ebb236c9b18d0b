//! administrative product registration and inventory endpoints.
//!
//! endpoints:
//! - `POST /admin/products` - register a product and bind a token
//! - `GET /admin/tokens` - list active tokens in registration order
//!
//! both require the admin bearer token (see [`super::AdminContext`]).

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use veriseal_types::{NewProduct, Product, TokenValue};

use super::{AdminContext, ApiError};
use crate::AppState;
use veriseal_db::Database;

/// request for registering a product.
#[derive(Debug, Deserialize)]
pub struct RegisterProductRequest {
    /// human-facing product name. must not be blank.
    pub name: String,

    /// token value to bind. generated by the server when omitted.
    /// validated during deserialization via the token value type.
    #[serde(default)]
    pub token: Option<TokenValue>,

    /// when the unit was manufactured.
    #[serde(default)]
    pub manufacture_date: Option<DateTime<Utc>>,

    /// when the unit expires.
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,

    /// free-text descriptive notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// response for the register endpoint.
///
/// this is the only place the full token value is returned; it is what
/// gets handed to the QR encoder collaborator for label printing.
#[derive(Debug, Serialize)]
pub struct RegisterProductResponse {
    /// the registered product identity.
    pub product: Product,
    /// the full bound token value.
    pub token: String,
}

/// POST /admin/products - register a product and bind a token.
pub async fn register_product(
    auth: AdminContext,
    State(state): State<AppState>,
    Json(request): Json<RegisterProductRequest>,
) -> Result<(StatusCode, Json<RegisterProductResponse>), ApiError> {
    let token_value = request.token.unwrap_or_else(TokenValue::generate);
    let product = NewProduct {
        name: request.name,
        manufacture_date: request.manufacture_date,
        expiry_date: request.expiry_date,
        notes: request.notes,
        image: None,
    };

    let (product, token) = state.db.register_product(&product, &token_value).await?;

    tracing::info!(
        admin = %auth.fingerprint,
        product_id = %product.id,
        "product registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterProductResponse {
            product,
            token: token.value.into_inner(),
        }),
    ))
}

/// one entry in the active token inventory.
#[derive(Debug, Serialize)]
pub struct ActiveTokenEntry {
    /// the bound token value.
    pub token: String,
    /// the product identity it authenticates.
    pub product: Product,
    /// when the token was registered.
    pub registered_at: DateTime<Utc>,
}

/// response wrapper for the token inventory endpoint.
#[derive(Debug, Serialize)]
pub struct ListTokensResponse {
    /// active tokens in registration order.
    pub tokens: Vec<ActiveTokenEntry>,
}

/// GET /admin/tokens - list active tokens in registration order.
///
/// audit/inventory only; verification decisions never read this.
pub async fn list_tokens(
    _auth: AdminContext,
    State(state): State<AppState>,
) -> Result<Json<ListTokensResponse>, ApiError> {
    let active = state.db.list_active_tokens().await?;
    let tokens = active
        .into_iter()
        .map(|(product, token)| ActiveTokenEntry {
            token: token.value.into_inner(),
            product,
            registered_at: token.created_at,
        })
        .collect();
    Ok(Json(ListTokensResponse { tokens }))
}
