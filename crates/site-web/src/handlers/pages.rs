//! Public page handlers

use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Serialize;
use site_service::dto::{CatalogParams, PortfolioParams, ServiceDetailPage};
use site_service::{CatalogService, PageService, PortfolioService};

use super::render;
use crate::response::{PageError, PageResult};
use crate::state::AppState;

/// GET /
pub async fn home(State(state): State<AppState>) -> PageResult<Html<String>> {
    let page = PageService::new(state.service_context()).home().await;
    render(&state, "home", &page)
}

/// GET /about/
pub async fn about(State(state): State<AppState>) -> PageResult<Html<String>> {
    let page = PageService::new(state.service_context()).about().await;
    render(&state, "about", &page)
}

/// GET /privacy/
pub async fn privacy(State(state): State<AppState>) -> PageResult<Html<String>> {
    let page = PageService::new(state.service_context()).privacy().await;
    render(&state, "privacy", &page)
}

/// GET /services/catalog/
pub async fn catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> PageResult<Html<String>> {
    let page = CatalogService::new(state.service_context()).list(params).await?;
    render(&state, "catalog", &page)
}

#[derive(Serialize)]
struct DetailView {
    #[serde(flatten)]
    page: ServiceDetailPage,
    /// Prefilled into the page's contact form
    service_context: String,
}

/// GET /services/catalog/:slug/
pub async fn service_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> PageResult<Html<String>> {
    let page = CatalogService::new(state.service_context()).detail(&slug).await?;
    let service_context = format!("Заявка на услугу: {}", page.service.name);
    render(&state, "service_detail", &DetailView { page, service_context })
}

/// GET /portfolio/
pub async fn portfolio(
    State(state): State<AppState>,
    Query(params): Query<PortfolioParams>,
) -> PageResult<Html<String>> {
    let page = PortfolioService::new(state.service_context()).page(params).await?;
    render(&state, "portfolio", &page)
}

/// Anything unrouted
pub async fn not_found() -> PageError {
    PageError::NotFound
}
