//! Middleware stack for the web server
//!
//! Request ID, tracing, response timing, security headers, host checks,
//! suspicious-input screening, rate limiting, timeout and CORS.

mod error_pages;
mod hosts;
mod rate_limit;
mod security;
mod suspicious;

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use site_common::CorsConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::state::AppState;

pub use error_pages::render_error_pages;
pub use hosts::enforce_allowed_hosts;
pub use rate_limit::{rate_limit, route_class, RATE_LIMIT_MESSAGE};
pub use security::{log_requests, security_headers, CONTENT_SECURITY_POLICY};
pub use suspicious::{find_suspicious, screen_suspicious, SUSPICIOUS_PATTERNS};

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Probes skip host checks and rate limiting
pub(crate) fn is_probe(path: &str) -> bool {
    path == "/health" || path.starts_with("/health/")
}

/// Apply the full middleware stack.
///
/// Layers run outermost-first in the reverse order they are added here:
/// Request ID -> Trace -> timing -> security headers -> hosts -> screening
/// -> rate limit -> timeout -> CORS -> compression -> error pages -> handler.
pub fn apply_middleware(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let config = state.config();
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(from_fn_with_state(state.clone(), render_error_pages))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config.cors, config.app.env.is_production()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .layer(from_fn_with_state(state.clone(), screen_suspicious))
        .layer(from_fn_with_state(state.clone(), enforce_allowed_hosts))
        .layer(from_fn_with_state(state.clone(), security_headers))
        .layer(from_fn(log_requests))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// Browsers only call the admin API cross-origin; public pages are same-origin
/// forms. An empty origin list means "any" outside production and "none" in it.
fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderName::from_static("x-response-time"),
        ]);

    match (config.allowed_origins.is_empty(), is_production) {
        (true, false) => {
            tracing::warn!("CORS_ALLOWED_ORIGINS empty, admin API accepts any origin");
            layer.allow_origin(Any)
        }
        (true, true) => {
            tracing::warn!("CORS_ALLOWED_ORIGINS empty, cross-origin admin calls are refused");
            layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        }
        (false, _) => {
            let origins: Vec<HeaderValue> = config
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "skipping malformed CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_paths() {
        assert!(is_probe("/health"));
        assert!(is_probe("/health/ready"));
        assert!(!is_probe("/healthcare/"));
        assert!(!is_probe("/"));
    }
}
