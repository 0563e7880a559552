//! Image uploads for admin forms

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use site_service::{AdminService, StoredFile};
use tracing::warn;

use crate::extractors::AdminAuth;
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// Store one image for an entity (`slides`, `services`, `portfolio`, ...)
///
/// POST /{admin}/api/uploads/{entity}, multipart field `file`
pub async fn upload(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(entity): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Created<Json<StoredFile>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_body(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            warn!(error = %e, "Upload stream failed");
            ApiError::invalid_body(e.body_text())
        })?;

        let stored = AdminService::new(state.service_context())
            .upload(&entity, &filename, &bytes)
            .await?;
        return Ok(Created(Json(stored)));
    }

    Err(ApiError::invalid_body("multipart field `file` is required"))
}
