//! Shared JSON-over-HTTP request handling for the lookup clients.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::lookups::LookupError;
use crate::telemetry;

/// Media type sent in `Content-Type` and `Accept`.
pub const APPLICATION_JSON_UTF8: &str = "application/json; charset=utf-8";

/// Header carrying the bearer token. The location service expects this
/// exact name rather than `Authorization`.
const AUTHENTICATION: &str = "Authentication";

/// Structured error body returned by the remote services.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: i64,
    message: String,
}

/// Accepts both `{code, message}` and `{"error": {code, message}}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Envelope { error: ErrorResponse },
    Flat(ErrorResponse),
}

impl ErrorBody {
    fn into_inner(self) -> ErrorResponse {
        match self {
            Self::Envelope { error } => error,
            Self::Flat(error) => error,
        }
    }
}

/// GETs JSON documents from one remote service.
///
/// Wraps a pooled [`reqwest::Client`]; cloning is cheap and shares the
/// connection pool. Requests are never retried.
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    http: Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl JsonHttpClient {
    /// Creates a client with its own connection pool and a per-request timeout.
    ///
    /// An empty `bearer_token` is treated as no token.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(
        base_url: Url,
        bearer_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(http, base_url, bearer_token))
    }

    /// Creates a client on top of an existing reqwest client.
    pub fn with_client(http: Client, base_url: Url, bearer_token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            bearer_token: bearer_token.filter(|t| !t.is_empty()),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL.
    ///
    /// Segments are percent-encoded, so user input cannot escape the base path.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidUrl`] if the base URL cannot have a path
    /// (e.g. `mailto:`).
    pub fn endpoint<I>(&self, segments: I) -> Result<Url, LookupError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request and decodes the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Transport`] if the request fails or times out
    /// - [`LookupError::Remote`] for statuses outside `[200, 400)` with a
    ///   structured error body
    /// - [`LookupError::UnknownStatus`] for such statuses without one
    /// - [`LookupError::Decode`] if a success body does not decode into `T`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let mut request = self
            .http
            .get(url)
            .header(CONTENT_TYPE, APPLICATION_JSON_UTF8)
            .header(ACCEPT, APPLICATION_JSON_UTF8);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = &self.bearer_token {
            request = request.header(AUTHENTICATION, format!("bearer {token}"));
        }

        request = request.headers(telemetry::current_trace_headers());

        // Urls are stripped from transport errors: the weather API key travels
        // in the query string.
        let response = request
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.without_url().to_string()))?;

        if !(200..400).contains(&status) {
            return Err(decode_error(status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))
    }
}

/// Maps an error response to a [`LookupError`].
fn decode_error(status: u16, body: &[u8]) -> LookupError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(error) => {
            let error = error.into_inner();
            debug!(status, code = error.code, "Remote service returned an error body");
            LookupError::Remote {
                status,
                message: error.message,
            }
        }
        Err(_) => LookupError::UnknownStatus(status),
    }
}
