//! Temperature lookup answered by another instance of this service.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::JsonHttpClient;
use crate::domain::entities::TemperatureResult;
use crate::domain::lookups::{LookupError, TemperatureLookup};

#[derive(Debug, Deserialize)]
struct TemperaturePayload {
    city: String,
    #[serde(rename = "temp_C", alias = "temp_c")]
    temp_c: f64,
    #[serde(rename = "temp_F", alias = "temp_f")]
    temp_f: f64,
    #[serde(rename = "temp_K", alias = "temp_k", default)]
    temp_k: f64,
}

impl From<TemperaturePayload> for TemperatureResult {
    fn from(payload: TemperaturePayload) -> Self {
        TemperatureResult {
            city: payload.city,
            temp_c: payload.temp_c,
            temp_f: payload.temp_f,
            temp_k: payload.temp_k,
        }
    }
}

/// Forwards postal codes with `GET <base>/<cep>`.
///
/// The bearer token, if any, is configured on the wrapped [`JsonHttpClient`].
#[derive(Debug, Clone)]
pub struct TemperatureGatewayClient {
    client: JsonHttpClient,
}

impl TemperatureGatewayClient {
    pub fn new(client: JsonHttpClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`LookupError::InvalidUrl`] if the base URL cannot carry a path.
    pub fn temperature_url(&self, postal_code: &str) -> Result<Url, LookupError> {
        self.client.endpoint([postal_code])
    }
}

#[async_trait]
impl TemperatureLookup for TemperatureGatewayClient {
    async fn resolve(&self, postal_code: &str) -> Result<TemperatureResult, LookupError> {
        let url = self.temperature_url(postal_code)?;
        debug!(%url, "Requesting upstream temperature");

        let payload: TemperaturePayload = self.client.get_json(url, &[]).await?;

        Ok(payload.into())
    }
}
