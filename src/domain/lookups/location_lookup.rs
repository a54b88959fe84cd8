//! Location lookup trait.

use crate::domain::entities::Location;
use crate::domain::lookups::LookupError;
use async_trait::async_trait;

/// Resolves a postal code to the city it belongs to.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::ViaCepClient`] - ViaCEP-compatible HTTP service
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Looks up `postal_code` on the remote service.
    ///
    /// Does not retry. An empty [`Location`] is a valid success value.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport failures, error statuses and
    /// undecodable responses.
    async fn resolve(&self, postal_code: &str) -> Result<Location, LookupError>;
}
