//! Weather reading entity produced by the weather lookup.

/// Current temperature of a city as reported by the weather service.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeatherReading {
    pub temperature_celsius: f64,
    pub temperature_fahrenheit: f64,
}

impl WeatherReading {
    pub fn new(temperature_celsius: f64, temperature_fahrenheit: f64) -> Self {
        Self {
            temperature_celsius,
            temperature_fahrenheit,
        }
    }
}
