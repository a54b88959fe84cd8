//! Tracing subscriber setup.

use anyhow::Result;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::OtlpConfig;
use crate::telemetry;

/// Keeps the trace exporter alive; call [`TelemetryGuard::shutdown`] before
/// exiting to flush pending spans.
#[must_use]
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    pub fn shutdown(self) {
        if let Some(provider) = self.provider
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!("Failed to flush trace exporter: {}", e);
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `log_level` is used when `RUST_LOG` holds no directives. `log_format`
/// selects human-readable (`text`) or structured (`json`) output. With
/// `otlp`, spans are also exported to an OpenTelemetry collector.
///
/// # Errors
///
/// Returns an error if `log_level` is not a valid filter, the exporter
/// cannot be built or a global subscriber is already installed.
pub fn init(log_level: &str, log_format: &str, otlp: Option<&OtlpConfig>) -> Result<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;

    let fmt_layer = match log_format {
        "json" => fmt::layer().json().with_current_span(true).boxed(),
        _ => fmt::layer().with_target(false).boxed(),
    };

    let provider = otlp.map(telemetry::init_tracer_provider).transpose()?;
    let otel_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(env!("CARGO_PKG_NAME")))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(TelemetryGuard { provider })
}
