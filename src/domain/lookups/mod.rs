//! Remote lookup capabilities consumed by the orchestration.
//!
//! Each trait has exactly one method so tests can substitute the network
//! calls. Implementations live in `crate::infrastructure::http`.
//!
//! # Available Lookups
//!
//! - [`LocationLookup`] - Postal code to city
//! - [`WeatherLookup`] - City to current temperature
//! - [`TemperatureLookup`] - Postal code to temperature, answered upstream

pub mod error;
pub mod location_lookup;
pub mod temperature_lookup;
pub mod weather_lookup;

pub use error::LookupError;
pub use location_lookup::LocationLookup;
pub use temperature_lookup::TemperatureLookup;
pub use weather_lookup::WeatherLookup;

#[cfg(test)]
pub use location_lookup::MockLocationLookup;
#[cfg(test)]
pub use temperature_lookup::MockTemperatureLookup;
#[cfg(test)]
pub use weather_lookup::MockWeatherLookup;
