//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod temperature;

pub use health::health_handler;
pub use temperature::{temperature_by_body_handler, temperature_by_path_handler};
