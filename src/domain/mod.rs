//! Domain layer containing the temperature lookup model and its capabilities.
//!
//! The domain layer has no knowledge of HTTP, configuration or logging setup.
//! It defines what the orchestration needs from the outside world and leaves
//! the concrete implementations to the infrastructure layer.
//!
//! # Architecture
//!
//! - [`entities`] - Request-scoped value types (location, weather reading, result)
//! - [`lookups`] - Remote lookup traits and their error type
//! - [`validators`] - Postal code validation capability and its implementations
//!
//! # Request Flow
//!
//! 1. [`validators::PostalCodeValidator`] checks the postal code shape
//! 2. [`lookups::LocationLookup`] resolves the postal code to a city
//! 3. [`lookups::WeatherLookup`] resolves the city to a temperature reading
//! 4. [`entities::TemperatureResult`] is built from the reading

pub mod entities;
pub mod lookups;
pub mod validators;
