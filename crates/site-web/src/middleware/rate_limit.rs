//! Fixed-window rate limiting per client address and route class

use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::is_probe;
use crate::extractors::client_ip;
use crate::state::AppState;

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

const CONTACT_PATH: &str = "/contacts/send/";

/// `contact` for the contact form endpoint, `general` for everything else
pub fn route_class(path: &str) -> &'static str {
    if path.contains(CONTACT_PATH) {
        "contact"
    } else {
        "general"
    }
}

/// Files and probes are not counted
fn is_exempt(path: &str) -> bool {
    is_probe(path) || path.starts_with("/static/") || path.starts_with("/media/")
}

pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let settings = &state.config().rate_limit;
    let path = request.uri().path();
    if !settings.enabled || is_exempt(path) {
        return next.run(request).await;
    }

    let class = route_class(path);
    let limit = match class {
        "contact" => settings.contact_requests,
        _ => settings.requests,
    };
    let ip = client_ip(request.headers(), request.extensions());

    let decision = state
        .rate_limiter()
        .check(class, &ip, limit, Duration::from_secs(settings.window_secs))
        .await;

    if !decision.allowed {
        warn!(ip = %ip, path = %path, class, count = decision.count, "Rate limit exceeded");
        let mut response = (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE).into_response();
        response.headers_mut().insert(
            header::RETRY_AFTER,
            HeaderValue::from(decision.retry_after_secs.max(1)),
        );
        return response;
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_class() {
        assert_eq!(route_class("/contacts/send/"), "contact");
        assert_eq!(route_class("/"), "general");
        assert_eq!(route_class("/services/catalog/"), "general");
    }

    #[test]
    fn test_exempt_paths() {
        assert!(is_exempt("/static/css/style.css"));
        assert!(is_exempt("/media/slides/2024/01/a.jpg"));
        assert!(is_exempt("/health/ready"));
        assert!(!is_exempt("/portfolio/"));
    }
}
