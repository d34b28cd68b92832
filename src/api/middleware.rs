//! API Middleware - Request Logging and Security Headers
//!
//! - Correlation IDs and request/response logging
//! - Security headers on every response

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::common::logging::{generate_correlation_id, log_api_request, log_api_response};

/// Header carrying the correlation ID in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Use the caller's request ID when it is a usable header value
fn correlation_id_from(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(generate_correlation_id)
}

/// Request logging middleware
///
/// Logs each request and its response status with duration, and echoes the
/// correlation ID back in `x-request-id`.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let correlation_id = correlation_id_from(request.headers());
    let started = Instant::now();

    log_api_request(&method, &path, &correlation_id);

    let mut response = next.run(request).await;

    let duration_ms = started.elapsed().as_millis() as u64;
    log_api_response(
        &method,
        &path,
        response.status().as_u16(),
        duration_ms,
        &correlation_id,
    );

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

/// Security headers middleware
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static("default-src 'none'"),
    );

    response
}
