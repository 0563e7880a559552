//! `Host` header check against `ALLOWED_HOSTS`

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::is_probe;
use crate::state::AppState;

pub async fn enforce_allowed_hosts(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let app = &state.config().app;
    if is_probe(request.uri().path()) || app.allowed_hosts.iter().any(|h| h == "*") {
        return next.run(request).await;
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().host());

    match host {
        Some(host) if app.is_host_allowed(host) => next.run(request).await,
        other => {
            warn!(host = other.unwrap_or(""), "Rejected request for unknown host");
            (StatusCode::BAD_REQUEST, "Bad Request (400)").into_response()
        }
    }
}
