//! api error handling for http handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// api error type for handler responses.
#[derive(Debug)]
pub enum ApiError {
    /// internal server error (500). the backing store call failed;
    /// no partial state change has happened.
    Internal(String),
    /// bad request (400).
    BadRequest(String),
    /// conflict (409), e.g. duplicate token registration.
    Conflict(String),
    /// not found (404).
    NotFound(String),
}

impl ApiError {
    /// create internal server error from any error type.
    pub fn internal(e: impl std::fmt::Display) -> Self {
        Self::Internal(e.to_string())
    }

    /// create bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// create not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<veriseal_db::Error> for ApiError {
    fn from(e: veriseal_db::Error) -> Self {
        use veriseal_db::Error;
        match e {
            Error::DuplicateToken => Self::Conflict(e.to_string()),
            Error::InvalidInput(_) | Error::EmptyLocation => Self::BadRequest(e.to_string()),
            // connectivity/transaction failure: fatal for this request only
            Error::Connection(_) | Error::Migration(_) | Error::Database(_) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                // don't leak store internals to the client
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, message).into_response()
    }
}
