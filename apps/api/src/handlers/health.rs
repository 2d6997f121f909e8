//! Liveness probe.

use axum::Json;

use crate::dto::HealthResponse;

/// Reports process liveness.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
