//! Temperature result returned by the orchestration.

use super::weather::WeatherReading;

/// Offset added to Celsius to obtain Kelvin.
///
/// Deployed clients compare against `tempC + 273`, so this stays at 273
/// rather than 273.15.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Converts a Celsius temperature to Kelvin using [`KELVIN_OFFSET`].
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

/// Temperature of the city a postal code belongs to, in three units.
///
/// Only produced when both lookups succeed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureResult {
    pub city: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub temp_k: f64,
}

impl TemperatureResult {
    /// Builds the result for `city` from a weather reading.
    ///
    /// Celsius and Fahrenheit are taken as reported; Kelvin is derived from
    /// Celsius.
    pub fn from_reading(city: impl Into<String>, reading: &WeatherReading) -> Self {
        Self {
            city: city.into(),
            temp_c: reading.temperature_celsius,
            temp_f: reading.temperature_fahrenheit,
            temp_k: celsius_to_kelvin(reading.temperature_celsius),
        }
    }
}
