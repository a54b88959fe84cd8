//! Front door that forwards validated postal codes upstream.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::domain::entities::{TemperatureResult, celsius_to_kelvin};
use crate::domain::lookups::TemperatureLookup;
use crate::domain::validators::PostalCodeValidator;

use super::cancellation::until_cancelled;
use super::{TemperatureError, TemperatureQuery};

/// Validates a postal code locally, then asks an upstream temperature
/// service for the answer.
///
/// The error taxonomy is the same as [`super::TemperatureService`]: any
/// upstream failure, including the upstream's own `invalid zipcode`, becomes
/// [`TemperatureError::NotFound`]. Kelvin is derived again from the upstream
/// Celsius value instead of being trusted.
pub struct GatewayService<V: ?Sized, T> {
    validator: Arc<V>,
    temperature_lookup: Arc<T>,
}

impl<V, T> GatewayService<V, T>
where
    V: PostalCodeValidator + ?Sized,
    T: TemperatureLookup,
{
    pub fn new(validator: Arc<V>, temperature_lookup: Arc<T>) -> Self {
        Self {
            validator,
            temperature_lookup,
        }
    }

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

        debug!("Forwarding postal code to upstream temperature service");

        let upstream = until_cancelled(cancel, || self.temperature_lookup.resolve(postal_code))
            .await?
            .map_err(|e| {
                warn!(error = %e, status = ?e.status(), "Upstream temperature lookup failed");
                TemperatureError::NotFound
            })?;

        let result = TemperatureResult {
            temp_k: celsius_to_kelvin(upstream.temp_c),
            ..upstream
        };
        info!(
            city = %result.city,
            temp_c = result.temp_c,
            temp_f = result.temp_f,
            temp_k = result.temp_k,
            "Temperature resolved upstream"
        );

        Ok(result)
    }
}

#[async_trait]
impl<V, T> TemperatureQuery for GatewayService<V, T>
where
    V: PostalCodeValidator + ?Sized,
    T: TemperatureLookup,
{
    async fn execute(
        &self,
        postal_code: &str,
        cancel: &CancellationToken,
    ) -> Result<TemperatureResult, TemperatureError> {
        GatewayService::execute(self, postal_code, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lookups::{LookupError, MockTemperatureLookup};
    use crate::domain::validators::{LengthValidator, MockPostalCodeValidator};

    fn upstream_result(temp_k: f64) -> TemperatureResult {
        TemperatureResult {
            city: "Feliz".to_string(),
            temp_c: 20.0,
            temp_f: 68.0,
            temp_k,
        }
    }

    #[tokio::test]
    async fn test_execute_forwards_valid_postal_code() {
        let mut lookup = MockTemperatureLookup::new();
        lookup
            .expect_resolve()
            .withf(|cep| cep == "95770000")
            .times(1)
            .returning(|_| Ok(upstream_result(293.0)));

        let service = GatewayService::new(Arc::new(LengthValidator), Arc::new(lookup));

        let result = service
            .execute("95770000", &CancellationToken::new())
            .await;

        assert_eq!(result, Ok(upstream_result(293.0)));
    }

    #[tokio::test]
    async fn test_execute_recomputes_kelvin() {
        let mut lookup = MockTemperatureLookup::new();
        lookup
            .expect_resolve()
            .times(1)
            .returning(|_| Ok(upstream_result(293.15)));

        let service = GatewayService::new(Arc::new(LengthValidator), Arc::new(lookup));

        let result = service
            .execute("95770000", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.temp_k, 293.0);
    }

    #[tokio::test]
    async fn test_execute_invalid_zipcode_is_not_forwarded() {
        let mut validator = MockPostalCodeValidator::new();
        validator.expect_is_valid().times(1).return_const(false);

        let mut lookup = MockTemperatureLookup::new();
        lookup.expect_resolve().times(0);

        let service = GatewayService::new(Arc::new(validator), Arc::new(lookup));

        let result = service.execute("1234", &CancellationToken::new()).await;

        assert_eq!(result, Err(TemperatureError::InvalidZipcode));
    }

    #[tokio::test]
    async fn test_execute_upstream_failure_is_not_found() {
        let mut lookup = MockTemperatureLookup::new();
        lookup.expect_resolve().times(1).returning(|_| {
            Err(LookupError::Remote {
                status: 422,
                message: "invalid zipcode".to_string(),
            })
        });

        let service = GatewayService::new(Arc::new(LengthValidator), Arc::new(lookup));

        let err = service
            .execute("95770000", &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err, TemperatureError::NotFound);
        assert_eq!(err.to_string(), "can not find zipcode");
    }

    #[tokio::test]
    async fn test_execute_already_cancelled_is_not_forwarded() {
        let mut lookup = MockTemperatureLookup::new();
        lookup.expect_resolve().times(0);

        let service = GatewayService::new(Arc::new(LengthValidator), Arc::new(lookup));

        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = service.execute("95770000", &cancel).await;

        assert_eq!(result, Err(TemperatureError::Cancelled));
    }

    #[tokio::test]
    async fn test_execute_through_trait_object() {
        let mut lookup = MockTemperatureLookup::new();
        lookup
            .expect_resolve()
            .times(1)
            .returning(|_| Ok(upstream_result(293.0)));

        let query: Arc<dyn TemperatureQuery> =
            Arc::new(GatewayService::new(Arc::new(LengthValidator), Arc::new(lookup)));

        let result = query
            .execute("95770000", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.city, "Feliz");
    }
}
