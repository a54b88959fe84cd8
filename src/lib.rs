//! # CEP Temperature
//!
//! Resolves a Brazilian postal code (CEP) to the current temperature of its
//! city, in Celsius, Fahrenheit and Kelvin.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, lookup traits and postal code validators
//! - **Application Layer** ([`application`]) - The temperature orchestration and the upstream gateway
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP clients for the location and weather services
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Request Flow
//!
//! 1. The postal code is validated locally (`422 invalid zipcode`)
//! 2. The location service resolves it to a city
//! 3. The weather service resolves the city to a temperature
//! 4. Kelvin is derived as Celsius + 273
//!
//! Any remote failure is reported as `404 can not find zipcode`.
//!
//! With `UPSTREAM_TEMPERATURE_BASE_URL` set, the service runs as a gateway:
//! step 1 happens locally and steps 2-4 are delegated to the upstream
//! instance at `GET <base>/<cep>`.
//!
//! ## Tracing
//!
//! Inbound `traceparent` headers are continued and outbound lookups carry the
//! current trace context. Spans are exported over OTLP/HTTP when
//! `OTEL_EXPORTER_OTLP_ENDPOINT` is set (see [`telemetry`]).
//!
//! ## Quick Start
//!
//! ```bash
//! export WEATHER_API_TOKEN="your-weatherapi-key"
//! cargo run
//!
//! curl http://localhost:8080/temperatura/95770000
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod state;
pub mod telemetry;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        GatewayService, TemperatureError, TemperatureQuery, TemperatureService,
    };
    pub use crate::domain::entities::{Location, TemperatureResult, WeatherReading};
    pub use crate::domain::lookups::{
        LocationLookup, LookupError, TemperatureLookup, WeatherLookup,
    };
    pub use crate::domain::validators::{PostalCodeValidator, ValidatorKind};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
