//! Use case services for the application layer.
//!
//! - [`TemperatureService`] - resolves a postal code through the location and
//!   weather lookups
//! - [`GatewayService`] - validates a postal code and forwards it to an
//!   upstream temperature service
//!
//! Both implement [`TemperatureQuery`], which is what the HTTP layer uses.

mod cancellation;
pub mod gateway_service;
pub mod temperature_service;

pub use gateway_service::GatewayService;
pub use temperature_service::{TemperatureError, TemperatureService};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::entities::TemperatureResult;

/// Answers a temperature request for a postal code.
#[async_trait]
pub trait TemperatureQuery: Send + Sync {
    /// # Errors
    ///
    /// - [`TemperatureError::InvalidZipcode`] if validation fails
    /// - [`TemperatureError::NotFound`] if any remote lookup fails
    /// - [`TemperatureError::Cancelled`] if `cancel` fires first
    async fn execute(
        &self,
        postal_code: &str,
        cancel: &CancellationToken,
    ) -> Result<TemperatureResult, TemperatureError>;
}
