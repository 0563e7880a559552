//! PostgreSQL implementation of AboutRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::AboutUs;
use site_core::traits::{AboutRepository, RepoResult};

use crate::models::AboutModel;

use super::error::{map_db_error, row_not_found};
use super::sql::{deactivate_others, lock_singleton};

const TABLE: &str = "about_us";

const SELECT_ABOUT: &str = r"
    SELECT id, title, subtitle, description, image, subtitle_margin_bottom,
           paragraph_margin_bottom, is_active, created_at, updated_at
    FROM about_us
";

/// PostgreSQL implementation of AboutRepository
#[derive(Clone)]
pub struct PgAboutRepository {
    pool: PgPool,
}

impl PgAboutRepository {
    /// Create a new PgAboutRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AboutRepository for PgAboutRepository {
    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Option<AboutUs>> {
        let sql = format!("{SELECT_ABOUT} WHERE is_active ORDER BY updated_at DESC LIMIT 1");
        let result = sqlx::query_as::<_, AboutModel>(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(AboutUs::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AboutUs>> {
        let sql = format!("{SELECT_ABOUT} WHERE id = $1");
        let result = sqlx::query_as::<_, AboutModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(AboutUs::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<AboutUs>> {
        let sql = format!("{SELECT_ABOUT} ORDER BY is_active DESC, updated_at DESC");
        let results = sqlx::query_as::<_, AboutModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(AboutUs::from).collect())
    }

    #[instrument(skip(self, about), fields(id = %about.id))]
    async fn create(&self, about: &AboutUs) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        lock_singleton(&mut tx, TABLE).await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO about_us (
                id, title, subtitle, description, image, subtitle_margin_bottom,
                paragraph_margin_bottom, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(about.id)
        .bind(&about.title)
        .bind(&about.subtitle)
        .bind(&about.description)
        .bind(&about.image)
        .bind(about.subtitle_margin_bottom)
        .bind(about.paragraph_margin_bottom)
        .bind(about.is_active)
        .bind(about.created_at)
        .bind(about.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if about.is_active {
            deactivate_others(&mut tx, TABLE, about.id)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, about), fields(id = %about.id))]
    async fn update(&self, about: &AboutUs) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        lock_singleton(&mut tx, TABLE).await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE about_us
            SET title = $2, subtitle = $3, description = $4, image = $5,
                subtitle_margin_bottom = $6, paragraph_margin_bottom = $7, is_active = $8
            WHERE id = $1
            ",
        )
        .bind(about.id)
        .bind(&about.title)
        .bind(&about.subtitle)
        .bind(&about.description)
        .bind(&about.image)
        .bind(about.subtitle_margin_bottom)
        .bind(about.paragraph_margin_bottom)
        .bind(about.is_active)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("About block", about.id));
        }

        if about.is_active {
            deactivate_others(&mut tx, TABLE, about.id)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM about_us WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
