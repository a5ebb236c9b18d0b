//! bearer token authentication for the administrative surface.
//!
//! registration and inventory listing are administrative actions. they
//! are gated behind a single bearer token whose sha-256 hash lives in
//! the config file; the core engine itself performs no authentication.
//!
//! ## Authentication flow
//!
//! 1. Extract `Authorization: Bearer <token>` header
//! 2. Hash the presented token with sha-256
//! 3. Compare against the configured hash (constant-time)

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::AppState;

/// context for authenticated administrative requests.
///
/// handlers take this as an extractor argument; constructing it any
/// other way is impossible outside this module, so holding one proves
/// the request presented the admin token.
#[derive(Debug, Clone)]
pub struct AdminContext {
    /// short hash prefix of the presented token, for audit logs.
    pub fingerprint: String,
}

/// error type for admin authentication failures.
#[derive(Debug)]
pub enum AdminAuthError {
    /// missing Authorization header.
    MissingHeader,
    /// invalid Authorization header format.
    InvalidHeader,
    /// token does not match the configured hash.
    InvalidCredentials,
    /// no admin token is configured; the surface is disabled.
    Disabled,
}

impl AdminAuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingHeader | Self::InvalidHeader | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::Disabled => StatusCode::FORBIDDEN,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::MissingHeader => "missing Authorization header",
            Self::InvalidHeader => "invalid Authorization header format",
            Self::InvalidCredentials => "invalid credentials",
            Self::Disabled => "admin surface is disabled",
        }
    }
}

impl axum::response::IntoResponse for AdminAuthError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), self.message().to_string()).into_response()
    }
}

/// parse a Bearer token from the Authorization header.
fn parse_bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ").map(str::trim)
}

/// hash a bearer token the way it is stored in the config file.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

impl FromRequestParts<AppState> for AdminContext {
    type Rejection = AdminAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected_hash) = state.config.admin.token_hash.as_deref() else {
            return Err(AdminAuthError::Disabled);
        };

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AdminAuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AdminAuthError::InvalidHeader)?;

        let token = parse_bearer_token(auth_header).ok_or(AdminAuthError::InvalidHeader)?;

        let presented_hash = hash_token(token);
        let matches: bool = presented_hash
            .as_bytes()
            .ct_eq(expected_hash.as_bytes())
            .into();
        if !matches {
            return Err(AdminAuthError::InvalidCredentials);
        }

        Ok(AdminContext {
            fingerprint: presented_hash.chars().take(8).collect(),
        })
    }
}
