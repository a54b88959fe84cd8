//! Weather lookup backed by a WeatherAPI-compatible service.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::JsonHttpClient;
use crate::domain::entities::WeatherReading;
use crate::domain::lookups::{LookupError, WeatherLookup};

const CURRENT_PATH: &str = "current.json";

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    #[serde(alias = "temp_C", alias = "TempC")]
    temp_c: f64,
    #[serde(alias = "temp_F", alias = "TempF")]
    temp_f: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherPayload {
    current: CurrentPayload,
}

impl From<WeatherPayload> for WeatherReading {
    fn from(payload: WeatherPayload) -> Self {
        WeatherReading::new(payload.current.temp_c, payload.current.temp_f)
    }
}

/// Fetches current conditions with
/// `GET <base>/current.json?key=<key>&aqi=no&q=<city>`.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: JsonHttpClient,
    api_key: String,
}

impl WeatherApiClient {
    /// Creates a weather client. The key travels as a query parameter, so
    /// `client` should not carry a bearer token.
    pub fn new(client: JsonHttpClient, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// URL of the current-conditions endpoint, without query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidUrl`] if the base URL cannot carry a path.
    pub fn current_url(&self) -> Result<Url, LookupError> {
        self.client.endpoint([CURRENT_PATH])
    }
}

#[async_trait]
impl WeatherLookup for WeatherApiClient {
    async fn resolve(&self, city: &str) -> Result<WeatherReading, LookupError> {
        let url = self.current_url()?;
        debug!(%url, city, "Requesting current weather");

        let payload: WeatherPayload = self
            .client
            .get_json(url, &[("key", &self.api_key), ("aqi", "no"), ("q", city)])
            .await?;

        Ok(payload.into())
    }
}
