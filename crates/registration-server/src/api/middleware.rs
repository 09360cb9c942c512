//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{debug, warn};

/// Log each request with its method, path, status and latency.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency = started.elapsed();

    if status.is_client_error() || status.is_server_error() {
        warn!(%method, path, %status, ?latency, "Request rejected");
    } else {
        debug!(%method, path, %status, ?latency, "Request handled");
    }

    response
}
