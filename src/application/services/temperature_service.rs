//! Postal code to temperature orchestration.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::domain::entities::{Location, TemperatureResult, WeatherReading};
use crate::domain::lookups::{LocationLookup, WeatherLookup};
use crate::domain::validators::PostalCodeValidator;

use super::TemperatureQuery;
use super::cancellation::until_cancelled;

/// Errors returned by [`TemperatureService::execute`].
///
/// The taxonomy is deliberately coarse: every remote failure becomes
/// [`TemperatureError::NotFound`]. The display strings are matched by
/// clients and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TemperatureError {
    /// The postal code failed local validation; no remote call was made.
    #[error("invalid zipcode")]
    InvalidZipcode,

    /// Either remote lookup failed (transport, error status or decoding).
    #[error("can not find zipcode")]
    NotFound,

    /// The caller cancelled the request while a lookup was in flight.
    #[error("request cancelled")]
    Cancelled,
}

/// Resolves a postal code to the current temperature of its city.
///
/// Composes a [`PostalCodeValidator`], a [`LocationLookup`] and a
/// [`WeatherLookup`]. The two lookups run strictly in sequence because the
/// weather lookup needs the city returned by the first one. Nothing is
/// retried and nothing is cached.
pub struct TemperatureService<V: ?Sized, L, W> {
    validator: Arc<V>,
    location_lookup: Arc<L>,
    weather_lookup: Arc<W>,
}

impl<V, L, W> TemperatureService<V, L, W>
where
    V: PostalCodeValidator + ?Sized,
    L: LocationLookup,
    W: WeatherLookup,
{
    /// Creates a new temperature service.
    pub fn new(validator: Arc<V>, location_lookup: Arc<L>, weather_lookup: Arc<W>) -> Self {
        Self {
            validator,
            location_lookup,
            weather_lookup,
        }
    }

    /// Returns the temperature of the city `postal_code` belongs to.
    ///
    /// # Steps
    ///
    /// 1. Validate the postal code (no network call if invalid)
    /// 2. Resolve the postal code to a city
    /// 3. Resolve the city to a weather reading (an empty city is passed on as is)
    /// 4. Derive Kelvin from Celsius
    ///
    /// # Cancellation
    ///
    /// Each lookup races against `cancel`. Once it fires, the in-flight
    /// request is dropped and [`TemperatureError::Cancelled`] is returned.
    ///
    /// # Errors
    ///
    /// - [`TemperatureError::InvalidZipcode`] if validation fails
    /// - [`TemperatureError::NotFound`] if either lookup fails for any reason
    /// - [`TemperatureError::Cancelled`] if `cancel` fires first
    #[instrument(name = "get-temperature", skip(self, cancel))]
    pub async fn execute(
        &self,
        postal_code: &str,
        cancel: &CancellationToken,
    ) -> Result<TemperatureResult, TemperatureError> {
        if !self.validator.is_valid(postal_code) {
            info!("Rejected invalid postal code");
            return Err(TemperatureError::InvalidZipcode);
        }

        let location = self.find_location(postal_code, cancel).await?;
        if location.is_empty() {
            debug!("Location lookup returned no city");
        }

        let reading = self.find_weather(&location.city, cancel).await?;

        let result = TemperatureResult::from_reading(location.city, &reading);
        info!(
            city = %result.city,
            temp_c = result.temp_c,
            temp_f = result.temp_f,
            temp_k = result.temp_k,
            "Temperature resolved"
        );

        Ok(result)
    }

    #[instrument(name = "find-location", skip_all)]
    async fn find_location(
        &self,
        postal_code: &str,
        cancel: &CancellationToken,
    ) -> Result<Location, TemperatureError> {
        debug!("Searching for postal code on location service");

        let location = until_cancelled(cancel, || self.location_lookup.resolve(postal_code))
            .await?
            .map_err(|e| {
                warn!(error = %e, status = ?e.status(), "Location lookup failed");
                TemperatureError::NotFound
            })?;

        debug!(city = %location.city, "Location resolved");
        Ok(location)
    }

    #[instrument(name = "find-weather", skip_all)]
    async fn find_weather(
        &self,
        city: &str,
        cancel: &CancellationToken,
    ) -> Result<WeatherReading, TemperatureError> {
        debug!(city, "Searching for weather on weather service");

        until_cancelled(cancel, || self.weather_lookup.resolve(city))
            .await?
            .map_err(|e| {
                warn!(city, error = %e, status = ?e.status(), "Weather lookup failed");
                TemperatureError::NotFound
            })
    }
}

#[async_trait]
impl<V, L, W> TemperatureQuery for TemperatureService<V, L, W>
where
    V: PostalCodeValidator + ?Sized,
    L: LocationLookup,
    W: WeatherLookup,
{
    async fn execute(
        &self,
        postal_code: &str,
        cancel: &CancellationToken,
    ) -> Result<TemperatureResult, TemperatureError> {
        TemperatureService::execute(self, postal_code, cancel).await
    }
}
