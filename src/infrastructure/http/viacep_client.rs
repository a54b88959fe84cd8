//! Location lookup backed by a ViaCEP-compatible service.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::JsonHttpClient;
use crate::domain::entities::Location;
use crate::domain::lookups::{LocationLookup, LookupError};

/// Address document returned by the location service.
///
/// ViaCEP names the city `localidade`; other deployments answer with
/// `city`. Blank values are skipped, and neither being present yields an
/// empty city.
#[derive(Debug, Deserialize)]
struct AddressPayload {
    city: Option<String>,
    localidade: Option<String>,
}

impl From<AddressPayload> for Location {
    fn from(payload: AddressPayload) -> Self {
        let non_blank = |s: &String| !s.trim().is_empty();

        let city = payload
            .city
            .filter(non_blank)
            .or(payload.localidade.filter(non_blank))
            .unwrap_or_default();

        Location::new(city)
    }
}

/// Resolves postal codes with `GET <base>/<cep>[/<suffix>]`.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: JsonHttpClient,
    path_suffix: Option<String>,
}

impl ViaCepClient {
    /// Creates a location client.
    ///
    /// `path_suffix` is appended after the postal code (ViaCEP needs `json`);
    /// `None` or an empty suffix requests `<base>/<cep>` only.
    pub fn new(client: JsonHttpClient, path_suffix: Option<String>) -> Self {
        Self {
            client,
            path_suffix: path_suffix.filter(|s| !s.is_empty()),
        }
    }

    /// Builds the lookup URL for a postal code.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidUrl`] if the base URL cannot carry a path.
    pub fn location_url(&self, postal_code: &str) -> Result<Url, LookupError> {
        match &self.path_suffix {
            Some(suffix) => self.client.endpoint([postal_code, suffix.as_str()]),
            None => self.client.endpoint([postal_code]),
        }
    }
}

#[async_trait]
impl LocationLookup for ViaCepClient {
    async fn resolve(&self, postal_code: &str) -> Result<Location, LookupError> {
        let url = self.location_url(postal_code)?;
        debug!(%url, "Requesting location");

        let payload: AddressPayload = self.client.get_json(url, &[]).await?;
        Ok(payload.into())
    }
}
