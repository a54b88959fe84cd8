//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `shutting_down` once graceful shutdown has begun.
    pub status: String,
    pub version: String,
    /// Active postal code validator.
    pub validator: String,
    /// `local` or `gateway`.
    pub mode: String,
}
