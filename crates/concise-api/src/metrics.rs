//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "concise_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "concise_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "concise_http_requests_in_flight";

    // Plan resolution metrics
    pub const PLAN_RESOLUTIONS_TOTAL: &str = "concise_plan_resolutions_total";
    pub const BILLING_LOOKUP_DURATION_SECONDS: &str = "concise_billing_lookup_duration_seconds";
    pub const BILLING_LOOKUP_FAILURES_TOTAL: &str = "concise_billing_lookup_failures_total";
    pub const BADGE_FALLBACKS_TOTAL: &str = "concise_badge_fallbacks_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a plan resolution outcome (active, free, unrecognized).
pub fn record_plan_resolution(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::PLAN_RESOLUTIONS_TOTAL, &labels).increment(1);
}

/// Record billing lookup latency.
pub fn record_billing_lookup_duration(duration_secs: f64) {
    histogram!(names::BILLING_LOOKUP_DURATION_SECONDS).record(duration_secs);
}

/// Record a failed billing lookup.
pub fn record_billing_lookup_failure(kind: &str) {
    let labels = [("kind", kind.to_string())];
    counter!(names::BILLING_LOOKUP_FAILURES_TOTAL, &labels).increment(1);
}

/// Record a badge rendered as free because the lookup failed.
pub fn record_badge_fallback() {
    counter!(names::BADGE_FALLBACKS_TOTAL).increment(1);
}

/// Route template for metrics labels; unmatched paths collapse to one label.
fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string())
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = route_label(&request);
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
