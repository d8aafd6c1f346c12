//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use std::time::Instant;

use crate::api::dto::health::{CheckStatus, HealthResponse};
use crate::state::AppState;

/// Reports whether the link store answers.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Link store reachable
/// - **503 Service Unavailable**: Link store unreachable (server runs degraded)
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": { "store": { "status": "ok", "message": "Link store reachable", "latency_ms": 2 } }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let ready = state.link_service.is_ready().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let store = if ready {
        CheckStatus::ok("Link store reachable", latency_ms)
    } else {
        tracing::warn!(latency_ms, "Health check: link store unavailable");
        CheckStatus::error("Link store unavailable", latency_ms)
    };

    let response = HealthResponse::from_store(store);
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
