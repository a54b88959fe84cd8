//! Application layer services implementing the use cases.
//!
//! Services consume the domain capability traits and expose a small API to
//! the HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::temperature_service::TemperatureService`] - Postal code to temperature

pub mod services;
