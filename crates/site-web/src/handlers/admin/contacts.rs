//! Contact inbox handlers

use axum::{extract::State, Json};
use serde::Serialize;
use site_service::dto::{
    BulkResult, ContactBulkRequest, ContactListParams, ContactMessageResponse, ContactUpdateInput,
    PaginatedResponse,
};
use site_service::AdminService;

use crate::extractors::{AdminAuth, ApiQuery, IdPath, JsonBody};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

/// List messages, newest first
///
/// GET /{admin}/api/contacts?status=&is_read=&search=&page=
pub async fn list_contacts(
    State(state): State<AppState>,
    _auth: AdminAuth,
    ApiQuery(params): ApiQuery<ContactListParams>,
) -> ApiResult<Json<PaginatedResponse<ContactMessageResponse>>> {
    let page = AdminService::new(state.service_context()).list_contacts(&params).await?;
    Ok(Json(page))
}

/// GET /{admin}/api/contacts/{id}
pub async fn get_contact(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<Json<ContactMessageResponse>> {
    let row = AdminService::new(state.service_context()).get_contact(id).await?;
    Ok(Json(row))
}

/// Change status, read flag or notes
///
/// PATCH /{admin}/api/contacts/{id}
pub async fn update_contact(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<ContactUpdateInput>,
) -> ApiResult<Json<ContactMessageResponse>> {
    let row = AdminService::new(state.service_context())
        .update_contact(id, input)
        .await?;
    Ok(Json(row))
}

/// POST /{admin}/api/contacts/bulk
pub async fn bulk_contacts(
    State(state): State<AppState>,
    _auth: AdminAuth,
    JsonBody(request): JsonBody<ContactBulkRequest>,
) -> ApiResult<Json<BulkResult>> {
    let result = AdminService::new(state.service_context())
        .bulk_contacts(request)
        .await?;
    Ok(Json(result))
}

/// DELETE /{admin}/api/contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context()).delete_contact(id).await?;
    Ok(NoContent)
}

/// Badge count for the admin menu
///
/// GET /{admin}/api/contacts/unread-count
pub async fn unread_count(State(state): State<AppState>, _auth: AdminAuth) -> ApiResult<Json<UnreadCount>> {
    let unread = AdminService::new(state.service_context()).unread_contacts().await?;
    Ok(Json(UnreadCount { unread }))
}
