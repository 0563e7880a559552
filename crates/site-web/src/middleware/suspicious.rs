//! Screening of request input for common attack fragments
//!
//! Matches are logged; with `SUSPICIOUS_BLOCK` they are rejected with 400.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use tracing::warn;

use crate::extractors::client_ip;
use crate::state::AppState;

/// Fragments matched case-insensitively
pub const SUSPICIOUS_PATTERNS: &[&str] = &[
    "eval(",
    "exec(",
    "<script",
    "javascript:",
    "onerror=",
    "../",
    "..\\",
    "etc/passwd",
    "cmd.exe",
    "union select",
    "drop table",
    "insert into",
    "--",
    "/*",
    "*/",
];

/// Largest urlencoded body buffered for screening
const MAX_FORM_BYTES: usize = 1024 * 1024;

/// First pattern contained in any of `values`
pub fn find_suspicious<'a, I>(values: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().find_map(|value| {
        let lowered = value.to_lowercase();
        SUSPICIOUS_PATTERNS
            .iter()
            .copied()
            .find(|pattern| lowered.contains(pattern))
    })
}

fn decoded_pairs(encoded: &str) -> Vec<String> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(encoded)
        .map(|pairs| pairs.into_iter().map(|(_, value)| value).collect())
        .unwrap_or_else(|_| vec![encoded.to_string()])
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

pub async fn screen_suspicious(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut inputs = vec![percent_decode_str(request.uri().path())
        .decode_utf8_lossy()
        .into_owned()];
    if let Some(query) = request.uri().query() {
        inputs.extend(decoded_pairs(query));
    }

    let request = if is_form(&request) {
        let (parts, body) = request.into_parts();
        let Ok(bytes) = to_bytes(body, MAX_FORM_BYTES).await else {
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        };
        inputs.extend(decoded_pairs(&String::from_utf8_lossy(&bytes)));
        Request::from_parts(parts, Body::from(bytes))
    } else {
        request
    };

    if let Some(pattern) = find_suspicious(inputs.iter().map(String::as_str)) {
        let ip = client_ip(request.headers(), request.extensions());
        warn!(
            ip = %ip,
            pattern,
            path = %request.uri().path(),
            "Suspicious activity detected"
        );
        if state.config().security.suspicious_block {
            return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(find_suspicious(["1 UNION SELECT password"]), Some("union select"));
        assert_eq!(find_suspicious(["<SCRIPT>alert(1)"]), Some("<script"));
        assert_eq!(find_suspicious(["/static/../../etc/passwd"]), Some("../"));
    }

    #[test]
    fn test_clean_input() {
        assert_eq!(find_suspicious(["Нужна вывеска на фасад", "+7 (914) 123-45-67"]), None);
        assert_eq!(find_suspicious(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_query_values_are_decoded() {
        let values = decoded_pairs("search=%3Cscript%3E&page=2");
        assert_eq!(values, vec!["<script>".to_string(), "2".to_string()]);
        assert_eq!(find_suspicious(values.iter().map(String::as_str)), Some("<script"));
    }
}
