//! Request-scoped value types of the temperature lookup.
//!
//! All entities are created fresh per request, never mutated after
//! construction and dropped once the response is written.
//!
//! - [`Location`] - City resolved from a postal code
//! - [`WeatherReading`] - Current temperature of a city
//! - [`TemperatureResult`] - The answer returned to callers

pub mod location;
pub mod temperature;
pub mod weather;

pub use location::Location;
pub use temperature::{KELVIN_OFFSET, TemperatureResult, celsius_to_kelvin};
pub use weather::WeatherReading;
