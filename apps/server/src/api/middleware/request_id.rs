//! Request ID middleware
//!
//! Creates a root span per HTTP request, assigns a server request ID
//! and echoes it back in the `x-request-id` response header.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Span;
use uuid::Uuid;

#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = %req.uri().path(),
        http.response.status_code = tracing::field::Empty,
        request_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let current_span = Span::current();
    let start = Instant::now();

    let request_id = Uuid::new_v4().to_string();
    current_span.record("request_id", &request_id);

    let path = req.uri().path().to_string();
    let method = req.method().clone();

    tracing::debug!(
        method = %method,
        path = %path,
        request_id = %request_id,
        "Incoming request"
    );

    let mut response = next.run(req).await;

    let status = response.status();
    let duration = start.elapsed();
    current_span.record("http.response.status_code", status.as_u16());

    tracing::info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = duration.as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}
