//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /temperatura/{cep}` - Temperature by postal code in the path
//! - `POST /`                  - Temperature by postal code in a JSON body
//! - `GET  /health`            - Liveness and shutdown state
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(service_router(state))
}

/// All routes with tracing, before path normalization.
///
/// Path normalization has to wrap the router from the outside, so this is
/// the largest piece that is still a plain [`Router`].
pub fn service_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::temperature_routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}
