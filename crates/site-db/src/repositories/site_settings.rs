//! PostgreSQL implementation of SiteSettingsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::SiteSettings;
use site_core::traits::{RepoResult, SiteSettingsRepository};

use crate::models::SiteSettingsModel;

use super::error::{map_db_error, row_not_found};
use super::sql::{deactivate_others, lock_singleton};

const TABLE: &str = "site_settings";

const SELECT_SETTINGS: &str = r"
    SELECT id, site_name, phone, email, address, working_hours, vk_link, instagram_link,
           telegram_link, telegram_bot_token, is_active, created_at, updated_at
    FROM site_settings
";

/// PostgreSQL implementation of SiteSettingsRepository
#[derive(Clone)]
pub struct PgSiteSettingsRepository {
    pool: PgPool,
}

impl PgSiteSettingsRepository {
    /// Create a new PgSiteSettingsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteSettingsRepository for PgSiteSettingsRepository {
    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Option<SiteSettings>> {
        let sql = format!("{SELECT_SETTINGS} WHERE is_active ORDER BY updated_at DESC LIMIT 1");
        let result = sqlx::query_as::<_, SiteSettingsModel>(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(SiteSettings::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<SiteSettings>> {
        let sql = format!("{SELECT_SETTINGS} WHERE id = $1");
        let result = sqlx::query_as::<_, SiteSettingsModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(SiteSettings::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<SiteSettings>> {
        let sql = format!("{SELECT_SETTINGS} ORDER BY is_active DESC, updated_at DESC");
        let results = sqlx::query_as::<_, SiteSettingsModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(SiteSettings::from).collect())
    }

    #[instrument(skip(self, settings), fields(id = %settings.id))]
    async fn create(&self, settings: &SiteSettings) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        lock_singleton(&mut tx, TABLE).await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO site_settings (
                id, site_name, phone, email, address, working_hours, vk_link, instagram_link,
                telegram_link, telegram_bot_token, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(settings.id)
        .bind(&settings.site_name)
        .bind(&settings.phone)
        .bind(&settings.email)
        .bind(&settings.address)
        .bind(&settings.working_hours)
        .bind(&settings.vk_link)
        .bind(&settings.instagram_link)
        .bind(&settings.telegram_link)
        .bind(&settings.telegram_bot_token)
        .bind(settings.is_active)
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if settings.is_active {
            deactivate_others(&mut tx, TABLE, settings.id)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, settings), fields(id = %settings.id))]
    async fn update(&self, settings: &SiteSettings) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        lock_singleton(&mut tx, TABLE).await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE site_settings
            SET site_name = $2, phone = $3, email = $4, address = $5, working_hours = $6,
                vk_link = $7, instagram_link = $8, telegram_link = $9,
                telegram_bot_token = $10, is_active = $11
            WHERE id = $1
            ",
        )
        .bind(settings.id)
        .bind(&settings.site_name)
        .bind(&settings.phone)
        .bind(&settings.email)
        .bind(&settings.address)
        .bind(&settings.working_hours)
        .bind(&settings.vk_link)
        .bind(&settings.instagram_link)
        .bind(&settings.telegram_link)
        .bind(&settings.telegram_bot_token)
        .bind(settings.is_active)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("Site settings", settings.id));
        }

        if settings.is_active {
            deactivate_others(&mut tx, TABLE, settings.id)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM site_settings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSiteSettingsRepository>();
    }
}
