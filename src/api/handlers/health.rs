//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns service status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: serving requests
/// - **503 Service Unavailable**: graceful shutdown has begun
///
/// Remote services are not contacted, so a healthy answer does not imply
/// they are reachable.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let shutting_down = state.shutdown.is_cancelled();

    let response = HealthResponse {
        status: if shutting_down { "shutting_down" } else { "healthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        validator: state.validator.to_string(),
        mode: state.mode.to_string(),
    };

    let status = if shutting_down {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (status, Json(response))
}
