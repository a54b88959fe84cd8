//! HTTP clients for the remote lookup services.
//!
//! All clients share [`JsonHttpClient`], which owns the pooled reqwest
//! client and the request/error-decoding contract:
//!
//! - `Content-Type` and `Accept` are `application/json; charset=utf-8`
//! - statuses in `[200, 400)` are decoded as success bodies
//! - other statuses are decoded as `{code, message}` error bodies, falling
//!   back to `unknown error, status code: <n>`
//!
//! # Implementations
//!
//! - [`ViaCepClient`] - [`crate::domain::lookups::LocationLookup`]
//! - [`WeatherApiClient`] - [`crate::domain::lookups::WeatherLookup`]
//! - [`TemperatureGatewayClient`] - [`crate::domain::lookups::TemperatureLookup`]

mod json_client;
mod temperature_gateway_client;
mod viacep_client;
mod weather_api_client;

pub use json_client::{APPLICATION_JSON_UTF8, JsonHttpClient};
pub use temperature_gateway_client::TemperatureGatewayClient;
pub use viacep_client::ViaCepClient;
pub use weather_api_client::WeatherApiClient;
