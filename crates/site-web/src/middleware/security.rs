//! Security headers and request timing

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::info;

use crate::extractors::client_ip;
use crate::state::AppState;

/// Policy for public pages; the admin surface is left without one
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    script-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net https://fonts.googleapis.com; \
    style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net https://fonts.googleapis.com; \
    img-src 'self' data: https:; \
    font-src 'self' https://fonts.gstatic.com;";

const RESPONSE_TIME: &str = "x-response-time";

const STATIC_HEADERS: [(&str, &str); 5] = [
    ("x-content-type-options", "nosniff"),
    ("x-xss-protection", "1; mode=block"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("permissions-policy", "geolocation=(), microphone=(), camera=()"),
];

/// Add the fixed security headers, plus a CSP outside the admin prefix
pub async fn security_headers(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let is_admin = request
        .uri()
        .path()
        .starts_with(&state.config().admin.mount_path());

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for (name, value) in STATIC_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    if !is_admin {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        );
    }
    response
}

/// One log line per request, and `X-Response-Time` in seconds
pub async fn log_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let ip = client_ip(request.headers(), request.extensions());

    let mut response = next.run(request).await;

    let elapsed = format!("{:.3}s", started.elapsed().as_secs_f64());
    info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        ip = %ip,
        duration = %elapsed,
        "Request handled"
    );
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(RESPONSE_TIME), value);
    }
    response
}
