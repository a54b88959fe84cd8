//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::telemetry;

/// Creates an `INFO` request span that continues the caller's trace.
///
/// A valid `traceparent` header makes the span a child of the remote span,
/// so traces of a gateway and its upstream join into one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceContextMakeSpan;

impl<B> MakeSpan<B> for TraceContextMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let span = tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        );

        let _ = span.set_parent(telemetry::extract_context(request.headers()));
        span
    }
}

/// Creates a tracing middleware for HTTP requests.
///
/// Each request gets an `INFO` span with method, URI and HTTP version; the
/// response is logged at `INFO` with status and latency in milliseconds.
/// 5xx responses are additionally reported as failures.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/temperatura/95770000 version=HTTP/1.1}: finished processing request latency=412 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, TraceContextMakeSpan> {
    TraceLayer::new_for_http()
        .make_span_with(TraceContextMakeSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
