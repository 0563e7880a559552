//! Admin authentication handlers

use axum::{extract::State, Json};
use site_service::dto::{AdminUserResponse, AuthResponse, LoginRequest, RefreshTokenRequest};
use site_service::AuthService;

use crate::extractors::{AdminAuth, ClientIp, JsonBody};
use crate::response::ApiResult;
use crate::state::AppState;

/// Login with username and password
///
/// POST /{admin}/api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request, &ip).await?;
    Ok(Json(response))
}

/// Rotate the token pair
///
/// POST /{admin}/api/auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}

/// GET /{admin}/api/auth/me
pub async fn me(State(state): State<AppState>, auth: AdminAuth) -> ApiResult<Json<AdminUserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.current_admin(auth.user_id).await?;
    Ok(Json(response))
}
