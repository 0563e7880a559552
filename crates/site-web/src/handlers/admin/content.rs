//! Site content: settings, slides, about blocks, testimonials and statistics

use axum::{extract::State, Json};
use site_service::dto::{
    AboutInput, AboutResponse, ApiResponse, ListParams, PaginatedResponse, SiteSettingsInput,
    SiteSettingsResponse, SlideInput, SlideResponse, StatisticInput, StatisticResponse,
    TestimonialInput, TestimonialResponse,
};
use site_service::AdminService;

use crate::extractors::{AdminAuth, ApiQuery, IdPath, JsonBody};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

// ============================================================================
// Site settings
// ============================================================================

/// GET /{admin}/api/settings
pub async fn list_settings(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> ApiResult<Json<ApiResponse<Vec<SiteSettingsResponse>>>> {
    let rows = AdminService::new(state.service_context()).list_settings().await?;
    Ok(Json(ApiResponse::new(rows)))
}

/// GET /{admin}/api/settings/{id}
pub async fn get_settings(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<SiteSettingsResponse>> {
    let row = AdminService::new(state.service_context()).get_settings(id).await?;
    Ok(Json(row))
}

/// POST /{admin}/api/settings
pub async fn create_settings(
    State(state): State<AppState>,
    _auth: AdminAuth,
    JsonBody(input): JsonBody<SiteSettingsInput>,
) -> ApiResult<Created<Json<SiteSettingsResponse>>> {
    let row = AdminService::new(state.service_context()).create_settings(input).await?;
    Ok(Created(Json(row)))
}

/// PUT /{admin}/api/settings/{id}
pub async fn update_settings(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<SiteSettingsInput>,
) -> ApiResult<Json<SiteSettingsResponse>> {
    let row = AdminService::new(state.service_context())
        .update_settings(id, input)
        .await?;
    Ok(Json(row))
}

/// DELETE /{admin}/api/settings/{id}
pub async fn delete_settings(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context()).delete_settings(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Slides
// ============================================================================

pub async fn list_slides(
    State(state): State<AppState>,
    _auth: AdminAuth,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<PaginatedResponse<SlideResponse>>> {
    let page = AdminService::new(state.service_context()).list_slides(&params).await?;
    Ok(Json(page))
}

pub async fn get_slide(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<SlideResponse>> {
    let row = AdminService::new(state.service_context()).get_slide(id).await?;
    Ok(Json(row))
}

pub async fn create_slide(
    State(state): State<AppState>,
    _auth: AdminAuth,
    JsonBody(input): JsonBody<SlideInput>,
) -> ApiResult<Created<Json<SlideResponse>>> {
    let row = AdminService::new(state.service_context()).create_slide(input).await?;
    Ok(Created(Json(row)))
}

pub async fn update_slide(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<SlideInput>,
) -> ApiResult<Json<SlideResponse>> {
    let row = AdminService::new(state.service_context()).update_slide(id, input).await?;
    Ok(Json(row))
}

pub async fn delete_slide(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context()).delete_slide(id).await?;
    Ok(NoContent)
}

// ============================================================================
// About blocks
// ============================================================================

pub async fn list_about(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> ApiResult<Json<ApiResponse<Vec<AboutResponse>>>> {
    let rows = AdminService::new(state.service_context()).list_about().await?;
    Ok(Json(ApiResponse::new(rows)))
}

pub async fn get_about(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<AboutResponse>> {
    let row = AdminService::new(state.service_context()).get_about(id).await?;
    Ok(Json(row))
}

pub async fn create_about(
    State(state): State<AppState>,
    _auth: AdminAuth,
    JsonBody(input): JsonBody<AboutInput>,
) -> ApiResult<Created<Json<AboutResponse>>> {
    let row = AdminService::new(state.service_context()).create_about(input).await?;
    Ok(Created(Json(row)))
}

pub async fn update_about(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<AboutInput>,
) -> ApiResult<Json<AboutResponse>> {
    let row = AdminService::new(state.service_context()).update_about(id, input).await?;
    Ok(Json(row))
}

pub async fn delete_about(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context()).delete_about(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Testimonials
// ============================================================================

pub async fn list_testimonials(
    State(state): State<AppState>,
    _auth: AdminAuth,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<PaginatedResponse<TestimonialResponse>>> {
    let page = AdminService::new(state.service_context())
        .list_testimonials(&params)
        .await?;
    Ok(Json(page))
}

pub async fn get_testimonial(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<TestimonialResponse>> {
    let row = AdminService::new(state.service_context()).get_testimonial(id).await?;
    Ok(Json(row))
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    _auth: AdminAuth,
    JsonBody(input): JsonBody<TestimonialInput>,
) -> ApiResult<Created<Json<TestimonialResponse>>> {
    let row = AdminService::new(state.service_context())
        .create_testimonial(input)
        .await?;
    Ok(Created(Json(row)))
}

pub async fn update_testimonial(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<TestimonialInput>,
) -> ApiResult<Json<TestimonialResponse>> {
    let row = AdminService::new(state.service_context())
        .update_testimonial(id, input)
        .await?;
    Ok(Json(row))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context()).delete_testimonial(id).await?;
    Ok(NoContent)
}

// ============================================================================
// Statistics
// ============================================================================

pub async fn list_statistics(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> ApiResult<Json<ApiResponse<Vec<StatisticResponse>>>> {
    let rows = AdminService::new(state.service_context()).list_statistics().await?;
    Ok(Json(ApiResponse::new(rows)))
}

pub async fn get_statistic(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<StatisticResponse>> {
    let row = AdminService::new(state.service_context()).get_statistic(id).await?;
    Ok(Json(row))
}

pub async fn create_statistic(
    State(state): State<AppState>,
    _auth: AdminAuth,
    JsonBody(input): JsonBody<StatisticInput>,
) -> ApiResult<Created<Json<StatisticResponse>>> {
    let row = AdminService::new(state.service_context()).create_statistic(input).await?;
    Ok(Created(Json(row)))
}

pub async fn update_statistic(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<StatisticInput>,
) -> ApiResult<Json<StatisticResponse>> {
    let row = AdminService::new(state.service_context())
        .update_statistic(id, input)
        .await?;
    Ok(Json(row))
}

pub async fn delete_statistic(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context()).delete_statistic(id).await?;
    Ok(NoContent)
}
