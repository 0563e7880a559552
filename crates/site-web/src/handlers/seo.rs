//! robots.txt and sitemap.xml

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
};
use site_service::services::sitemap::robots_txt as render_robots;
use site_service::SitemapService;

use crate::response::PageResult;
use crate::state::AppState;

/// Absolute site root from the request, honouring a TLS-terminating proxy
fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|p| *p == "https" || *p == "http")
        .unwrap_or("http");
    format!("{scheme}://{host}")
}

/// GET /robots.txt
pub async fn robots_txt(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let body = render_robots(&base_url(&headers), &state.config().admin.url);
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

/// GET /sitemap.xml
pub async fn sitemap_xml(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> PageResult<impl IntoResponse> {
    let xml = SitemapService::new(state.service_context())
        .sitemap_xml(&base_url(&headers))
        .await?;
    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_base_url() {
        let mut headers = HeaderMap::new();
        assert_eq!(base_url(&headers), "http://localhost");

        headers.insert(header::HOST, HeaderValue::from_static("yarkiy-gorod.ru"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(base_url(&headers), "https://yarkiy-gorod.ru");
    }
}
