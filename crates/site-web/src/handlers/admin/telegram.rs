//! Telegram subscriber handlers

use axum::{extract::State, Json};
use site_service::dto::{ApiResponse, TelegramChatResponse, TelegramChatUpdate};
use site_service::AdminService;

use crate::extractors::{AdminAuth, IdPath, JsonBody};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /{admin}/api/telegram-chats
pub async fn list_chats(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> ApiResult<Json<ApiResponse<Vec<TelegramChatResponse>>>> {
    let rows = AdminService::new(state.service_context())
        .list_telegram_chats()
        .await?;
    Ok(Json(ApiResponse::new(rows)))
}

/// Mute or unmute a subscriber
///
/// PATCH /{admin}/api/telegram-chats/{id}
pub async fn update_chat(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
    JsonBody(update): JsonBody<TelegramChatUpdate>,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context())
        .update_telegram_chat(id, update)
        .await?;
    Ok(NoContent)
}

/// DELETE /{admin}/api/telegram-chats/{id}
pub async fn delete_chat(
    State(state): State<AppState>,
    _auth: AdminAuth,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    AdminService::new(state.service_context())
        .delete_telegram_chat(id)
        .await?;
    Ok(NoContent)
}
