//! Upstream temperature lookup trait.

use crate::domain::entities::TemperatureResult;
use crate::domain::lookups::LookupError;
use async_trait::async_trait;

/// Resolves a postal code to a temperature through another instance of this
/// service.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::TemperatureGatewayClient`] - upstream HTTP service
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemperatureLookup: Send + Sync {
    /// Asks the upstream service for the temperature of `postal_code`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport failures, error statuses
    /// (including the upstream's own 404/422) and undecodable responses.
    async fn resolve(&self, postal_code: &str) -> Result<TemperatureResult, LookupError>;
}
