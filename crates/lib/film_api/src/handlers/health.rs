//! Liveness endpoint.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /health` — always `{"status":"ok"}` while the process serves requests.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}
