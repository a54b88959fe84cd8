//! Weather lookup trait.

use crate::domain::entities::WeatherReading;
use crate::domain::lookups::LookupError;
use async_trait::async_trait;

/// Resolves a city name to its current temperature.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::WeatherApiClient`] - WeatherAPI-compatible HTTP service
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Fetches the current reading for `city`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport failures, error statuses and
    /// undecodable responses.
    async fn resolve(&self, city: &str) -> Result<WeatherReading, LookupError>;
}
