//! Categories, services and portfolio items

use axum::{extract::State, Json};
use site_service::dto::{
    CategoryInput, CategoryResponse, ListParams, PaginatedResponse, PortfolioItemInput,
    PortfolioItemResponse, ServiceInput, ServiceResponse,
};
use site_service::AdminService;

use crate::extractors::{AdminAuth, ApiQuery, IdPath, JsonBody};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

// ============================================================================
// Categories
// ============================================================================

/// GET /{admin}/api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    _auth: AdminAuth,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<PaginatedResponse<CategoryResponse>>> {
    let page = AdminService::new(state.service_context())
        .list_categories(&params)
        .await?;
    Ok(Json(page))
}

pub async fn get_category(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<CategoryResponse>> {
    let row = AdminService::new(state.service_context()).get_category(id).await?;
    Ok(Json(row))
}

/// POST /{admin}/api/categories
///
/// The slug is derived from the name when omitted.
pub async fn create_category(
    State(state): State<AppState>,
    _auth: AdminAuth,
    JsonBody(input): JsonBody<CategoryInput>,
) -> ApiResult<Created<Json<CategoryResponse>>> {
    let row = AdminService::new(state.service_context()).create_category(input).await?;
    Ok(Created(Json(row)))
}

pub async fn update_category(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<CategoryInput>,
) -> ApiResult<Json<CategoryResponse>> {
    let row = AdminService::new(state.service_context())
        .update_category(id, input)
        .await?;
    Ok(Json(row))
}

pub async fn delete_category(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context()).delete_category(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Services
// ============================================================================

/// GET /{admin}/api/services
pub async fn list_services(
    State(state): State<AppState>,
    _auth: AdminAuth,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<PaginatedResponse<ServiceResponse>>> {
    let page = AdminService::new(state.service_context()).list_services(&params).await?;
    Ok(Json(page))
}

pub async fn get_service(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<ServiceResponse>> {
    let row = AdminService::new(state.service_context()).get_service(id).await?;
    Ok(Json(row))
}

pub async fn create_service(
    State(state): State<AppState>,
    _auth: AdminAuth,
    JsonBody(input): JsonBody<ServiceInput>,
) -> ApiResult<Created<Json<ServiceResponse>>> {
    let row = AdminService::new(state.service_context()).create_service(input).await?;
    Ok(Created(Json(row)))
}

pub async fn update_service(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<ServiceInput>,
) -> ApiResult<Json<ServiceResponse>> {
    let row = AdminService::new(state.service_context())
        .update_service(id, input)
        .await?;
    Ok(Json(row))
}

pub async fn delete_service(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context()).delete_service(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Portfolio
// ============================================================================

pub async fn list_portfolio(
    State(state): State<AppState>,
    _auth: AdminAuth,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<PaginatedResponse<PortfolioItemResponse>>> {
    let page = AdminService::new(state.service_context())
        .list_portfolio(&params)
        .await?;
    Ok(Json(page))
}

pub async fn get_portfolio_item(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<PortfolioItemResponse>> {
    let row = AdminService::new(state.service_context())
        .get_portfolio_item(id)
        .await?;
    Ok(Json(row))
}

pub async fn create_portfolio_item(
    State(state): State<AppState>,
    _auth: AdminAuth,
    JsonBody(input): JsonBody<PortfolioItemInput>,
) -> ApiResult<Created<Json<PortfolioItemResponse>>> {
    let row = AdminService::new(state.service_context())
        .create_portfolio_item(input)
        .await?;
    Ok(Created(Json(row)))
}

pub async fn update_portfolio_item(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<PortfolioItemInput>,
) -> ApiResult<Json<PortfolioItemResponse>> {
    let row = AdminService::new(state.service_context())
        .update_portfolio_item(id, input)
        .await?;
    Ok(Json(row))
}

pub async fn delete_portfolio_item(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context())
        .delete_portfolio_item(id)
        .await?;
    Ok(NoContent)
}
