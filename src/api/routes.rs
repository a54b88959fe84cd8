//! API route configuration.

use crate::api::handlers::{temperature_by_body_handler, temperature_by_path_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Temperature lookup routes.
///
/// # Endpoints
///
/// - `GET  /temperatura/{cep}` - Postal code in the path
/// - `POST /`                  - Postal code in a `{"cep": ...}` body
pub fn temperature_routes() -> Router<AppState> {
    Router::new()
        .route("/temperatura/{cep}", get(temperature_by_path_handler))
        .route("/", post(temperature_by_body_handler))
}
