//! Client address and request-kind extractors

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, Extensions, HeaderMap},
};

const FORWARDED_FOR: &str = "x-forwarded-for";
const REQUESTED_WITH: &str = "x-requested-with";

/// First `X-Forwarded-For` entry, else the socket peer, else `unknown`
pub fn client_ip(headers: &HeaderMap, extensions: &Extensions) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match forwarded {
        Some(ip) => ip.to_string(),
        None => extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.ip().to_string()),
    }
}

/// Address the request is attributed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(client_ip(&parts.headers, &parts.extensions)))
    }
}

/// Whether the request came from page script (`X-Requested-With: XMLHttpRequest`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsAjax(pub bool);

#[async_trait]
impl<S> FromRequestParts<S> for IsAjax
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ajax = parts
            .headers
            .get(REQUESTED_WITH)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
        Ok(Self(ajax))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_forwarded_for_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_ip(&headers, &Extensions::new()), "203.0.113.7");
    }

    #[test]
    fn test_falls_back_to_peer() {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 50000))));
        assert_eq!(client_ip(&HeaderMap::new(), &extensions), "192.0.2.1");
        assert_eq!(client_ip(&HeaderMap::new(), &Extensions::new()), "unknown");
    }
}
