use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::TemperatureError;

/// Runs the future built by `call` unless `cancel` fires first.
///
/// The future is not even created when the token is already cancelled.
pub(super) async fn until_cancelled<F, T>(
    cancel: &CancellationToken,
    call: impl FnOnce() -> F,
) -> Result<T, TemperatureError>
where
    F: Future<Output = T>,
{
    if cancel.is_cancelled() {
        return Err(TemperatureError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Lookup cancelled by caller");
            Err(TemperatureError::Cancelled)
        }
        output = call() => Ok(output),
    }
}
