//! health check endpoint handler.

use std::time::Duration;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tokio::time::timeout;

use crate::AppState;
use veriseal_db::Database;

/// how long the store ping may take before the check reports failure.
const PING_TIMEOUT: Duration = Duration::from_secs(1);

/// outcome of the backing store probe.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum HealthStatus {
    Pass,
    Fail,
}

/// health check response, serialized per RFC 8040 conventions.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    status: HealthStatus,
}

impl IntoResponse for HealthReport {
    fn into_response(self) -> Response {
        let code = match self.status {
            HealthStatus::Pass => StatusCode::OK,
            HealthStatus::Fail => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            code,
            [(
                header::CONTENT_TYPE,
                "application/health+json; charset=utf-8",
            )],
            Json(self),
        )
            .into_response()
    }
}

/// GET /health - report whether the store is reachable.
///
/// a ping that errors or takes longer than [`PING_TIMEOUT`] both count
/// as failure; a liveness probe must not hang on a wedged store.
pub async fn health(State(state): State<AppState>) -> HealthReport {
    let healthy = matches!(timeout(PING_TIMEOUT, state.db.ping()).await, Ok(Ok(())));
    if !healthy {
        tracing::warn!("health check could not reach the database");
    }
    HealthReport {
        status: if healthy {
            HealthStatus::Pass
        } else {
            HealthStatus::Fail
        },
    }
}
