//! PostgreSQL implementation of AdminUserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::AdminUser;
use site_core::error::DomainError;
use site_core::traits::{AdminUserRepository, RepoResult};

use crate::models::AdminUserModel;

use super::error::{map_db_error, map_unique_violation, row_not_found};

const SELECT_USERS: &str = r"
    SELECT id, username, password_hash, is_active, last_login_at, created_at, updated_at
    FROM admin_users
";

/// PostgreSQL implementation of AdminUserRepository
#[derive(Clone)]
pub struct PgAdminUserRepository {
    pool: PgPool,
}

impl PgAdminUserRepository {
    /// Create a new PgAdminUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminUserRepository for PgAdminUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AdminUser>> {
        let sql = format!("{SELECT_USERS} WHERE id = $1");
        let result = sqlx::query_as::<_, AdminUserModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(AdminUser::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>> {
        let sql = format!("{SELECT_USERS} WHERE username = $1");
        let result = sqlx::query_as::<_, AdminUserModel>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(AdminUser::from))
    }

    #[instrument(skip(self, user, password_hash), fields(username = %user.username))]
    async fn create(&self, user: &AdminUser, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO admin_users (id, username, password_hash, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(password_hash)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameTaken))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE admin_users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("Admin user", id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_login(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("UPDATE admin_users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
