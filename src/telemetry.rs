//! OpenTelemetry trace export and W3C trace context propagation.
//!
//! Spans recorded through `tracing` are exported over OTLP/HTTP when an
//! endpoint is configured (see [`crate::logging::init`]). Independently of
//! export, the `traceparent` header of inbound requests becomes the parent of
//! the request span, and outbound lookups carry the current span context.

use anyhow::{Context as _, Result};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::propagation::{Extractor, Injector, TextMapPropagator};
use opentelemetry::{Context, KeyValue};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::config::OtlpConfig;

const TRACES_PATH: &str = "/v1/traces";

/// Full OTLP/HTTP traces URL for a collector base URL.
pub fn traces_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.ends_with(TRACES_PATH) {
        endpoint.to_string()
    } else {
        format!("{endpoint}{TRACES_PATH}")
    }
}

/// Builds a tracer provider exporting spans in batches to the collector.
///
/// The exporter uses a blocking HTTP client on the batch processor's own
/// thread, so this must be called outside the async runtime.
///
/// # Errors
///
/// Returns an error if the exporter cannot be built.
pub fn init_tracer_provider(config: &OtlpConfig) -> Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(traces_endpoint(&config.endpoint))
        .build()
        .context("Failed to build OTLP span exporter")?;

    let resource = Resource::builder()
        .with_attribute(KeyValue::new(SERVICE_NAME, config.service_name.clone()))
        .with_attribute(KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")))
        .build();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build())
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

struct HeaderInjector<'a>(&'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            self.0.insert(name, value);
        }
    }
}

/// Reads the remote parent from `traceparent`/`tracestate` headers.
///
/// Returns an empty context when the headers are missing or malformed.
pub fn extract_context(headers: &HeaderMap) -> Context {
    TraceContextPropagator::new().extract(&HeaderExtractor(headers))
}

/// Writes `cx` as `traceparent`/`tracestate` headers. Nothing is written for
/// a context without a valid span.
pub fn inject_context(cx: &Context, headers: &mut HeaderMap) {
    TraceContextPropagator::new().inject_context(cx, &mut HeaderInjector(headers));
}

/// Trace headers for an outbound request made inside the current span.
pub fn current_trace_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    inject_context(&tracing::Span::current().context(), &mut headers);
    headers
}
