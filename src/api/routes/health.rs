//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// The dataset loads lazily on the first data request, so readiness does
/// not depend on the slot being populated.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status with dataset details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (dataset_status, records) = match state.cache.loaded() {
        Some(dataset) => ("loaded", dataset.records.len()),
        None => ("pending", 0),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        dataset: dataset_status.to_string(),
        records,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
