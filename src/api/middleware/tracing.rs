//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// - Span at `INFO` with method, URI and version
/// - Request start at `DEBUG`
/// - Response at `INFO` with status and latency (ms)
/// - 5xx at `WARN` (e.g. 503 when the link store is down)
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/abc123 version=HTTP/1.1}: finished processing request latency=3 ms status=307
/// WARN request{method=GET uri=/health version=HTTP/1.1}: response failed classification=Status code: 503 latency=12 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::WARN)
                .latency_unit(LatencyUnit::Millis),
        )
}
