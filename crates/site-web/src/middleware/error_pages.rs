//! HTML error pages for the public site

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use site_service::PageService;
use tracing::error;

use crate::response::ErrorPage;
use crate::state::AppState;

/// Replace marked error responses with the rendered error template
pub async fn render_error_pages(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let site = PageService::new(state.service_context()).site_context().await;
    let data = json!({
        "site": site,
        "status": page.status.as_u16(),
        "title": page.title,
        "message": page.message,
    });

    match state.templates().render("error", &data) {
        Ok(html) => (page.status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render error page");
            (page.status, page.title).into_response()
        }
    }
}
