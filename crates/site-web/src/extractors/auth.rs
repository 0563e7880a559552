//! Authentication extractor
//!
//! Extracts and validates admin access tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use site_common::TokenKind;
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated admin extracted from an access token
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub user_id: Uuid,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        // Expired and refresh tokens are reported as their own error codes
        let claims = app_state
            .jwt_service()
            .verify(bearer.token(), TokenKind::Access)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected admin access token");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::InvalidAuthFormat
        })?;

        Ok(AdminAuth {
            user_id,
            username: claims.username,
        })
    }
}
