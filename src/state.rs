//! Shared application state injected into handlers.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::services::TemperatureQuery;
use crate::config::ServiceMode;
use crate::domain::validators::ValidatorKind;

#[derive(Clone)]
pub struct AppState {
    /// Local orchestration or upstream gateway, depending on [`ServiceMode`].
    pub temperature_service: Arc<dyn TemperatureQuery>,
    /// Cancelled when the server starts shutting down. Requests run on
    /// child tokens of this one.
    pub shutdown: CancellationToken,
    pub validator: ValidatorKind,
    pub mode: ServiceMode,
}

impl AppState {
    pub fn new(
        temperature_service: Arc<dyn TemperatureQuery>,
        shutdown: CancellationToken,
        validator: ValidatorKind,
        mode: ServiceMode,
    ) -> Self {
        Self {
            temperature_service,
            shutdown,
            validator,
            mode,
        }
    }

    /// Token for a single request, cancelled together with the server.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
