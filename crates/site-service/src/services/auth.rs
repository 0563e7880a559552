//! Admin authentication
//!
//! Login, token refresh and account creation. Failed logins are counted per
//! (username, client address); once the limit is hit the pair is refused
//! until the cool-off expires.

use site_common::auth::validate_password_strength;
use site_common::{AppError, TokenKind};
use site_core::AdminUser;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{AdminUserResponse, AuthResponse, CreateAdminRequest, LoginRequest, RefreshTokenRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn locked(&self) -> ServiceError {
        AppError::LoginLocked {
            retry_after_secs: self.ctx.lockout().cooloff_secs(),
        }
        .into()
    }

    /// Count a failure and pick the error the caller sees
    async fn fail(&self, username: &str, client: &str) -> ServiceError {
        match self.ctx.lockout().record_failure(username, client).await {
            Ok(true) => {
                warn!(username, client, "Login locked after repeated failures");
                self.locked()
            }
            Ok(false) => AppError::InvalidCredentials.into(),
            Err(e) => {
                warn!(error = %e, "Failed to record login failure");
                AppError::InvalidCredentials.into()
            }
        }
    }

    fn issue(&self, user: &AdminUser) -> ServiceResult<AuthResponse> {
        let pair = self
            .ctx
            .jwt_service()
            .issue_pair(user.id, &user.username)?;
        Ok(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: Some(user.into()),
        })
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest, client: &str) -> ServiceResult<AuthResponse> {
        request.validate()?;
        let username = request.username.trim();

        match self.ctx.lockout().is_locked(username, client).await {
            Ok(true) => {
                warn!(client, "Login refused: locked out");
                return Err(self.locked());
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "Lockout check unavailable, continuing"),
        }

        let Some(user) = self.ctx.admin_repo().find_by_username(username).await? else {
            warn!("Login failed: unknown user");
            return Err(self.fail(username, client).await);
        };

        let hash = self.ctx.admin_repo().get_password_hash(user.id).await?;
        let verified = match hash {
            Some(hash) => self
                .ctx
                .password_service()
                .verify_or_error(&request.password, &hash)
                .is_ok(),
            None => false,
        };
        if !verified {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(self.fail(username, client).await);
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Login refused: account disabled");
            return Err(AppError::AccountDisabled.into());
        }

        if let Err(e) = self.ctx.lockout().clear(username, client).await {
            warn!(error = %e, "Failed to reset login failures");
        }
        self.ctx.admin_repo().record_login(user.id).await?;

        info!(user_id = %user.id, "Admin logged in");
        self.issue(&user)
    }

    /// Rotate a refresh token; the account must still exist and be active
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .verify(&request.refresh_token, TokenKind::Refresh)?;

        let user = self
            .ctx
            .admin_repo()
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;
        if !user.is_active {
            return Err(AppError::AccountDisabled.into());
        }

        self.issue(&user)
    }

    /// The admin behind a validated access token
    pub async fn current_admin(&self, user_id: Uuid) -> ServiceResult<AdminUserResponse> {
        let user = self
            .ctx
            .admin_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("AdminUser", user_id.to_string()))?;
        Ok(user.into())
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_admin(&self, request: CreateAdminRequest) -> ServiceResult<AdminUserResponse> {
        request.validate()?;
        let username = request.username.trim().to_string();
        validate_password_strength(&request.password, &username)?;

        if self
            .ctx
            .admin_repo()
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict(format!(
                "Admin user '{username}' already exists"
            )));
        }

        let hash = self.ctx.password_service().hash(&request.password)?;
        let user = AdminUser::new(username);
        self.ctx.admin_repo().create(&user, &hash).await?;

        info!(user_id = %user.id, "Admin user created");
        Ok(user.into())
    }
}
