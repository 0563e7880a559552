//! PostgreSQL implementation of SlideRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::Slide;
use site_core::traits::{ListQuery, Page, RepoResult, SlideRepository};

use crate::models::SlideModel;

use super::error::{map_db_error, row_not_found};
use super::sql::{like_pattern, page_bounds};

const SELECT_SLIDES: &str = r"
    SELECT id, title, subtitle, image, button_text, button_link, sort_order, is_active,
           created_at, updated_at
    FROM slides
";

const LIST_FILTER: &str = r"
    WHERE ($1::text IS NULL OR title ILIKE $1 OR subtitle ILIKE $1)
      AND ($2::bool IS NULL OR is_active = $2)
";

/// PostgreSQL implementation of SlideRepository
#[derive(Clone)]
pub struct PgSlideRepository {
    pool: PgPool,
}

impl PgSlideRepository {
    /// Create a new PgSlideRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlideRepository for PgSlideRepository {
    #[instrument(skip(self))]
    async fn list_active(&self, limit: i64) -> RepoResult<Vec<Slide>> {
        let sql = format!(
            "{SELECT_SLIDES} WHERE is_active ORDER BY sort_order ASC, created_at DESC LIMIT $1"
        );
        let results = sqlx::query_as::<_, SlideModel>(&sql)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Slide::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Slide>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);
        let pattern = like_pattern(query.search.as_deref());

        let sql = format!(
            "{SELECT_SLIDES} {LIST_FILTER} ORDER BY sort_order ASC, created_at DESC LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, SlideModel>(&sql)
            .bind(&pattern)
            .bind(query.is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM slides {LIST_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&pattern)
            .bind(query.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(Slide::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Slide>> {
        let sql = format!("{SELECT_SLIDES} WHERE id = $1");
        let result = sqlx::query_as::<_, SlideModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Slide::from))
    }

    #[instrument(skip(self, slide), fields(id = %slide.id))]
    async fn create(&self, slide: &Slide) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO slides (
                id, title, subtitle, image, button_text, button_link, sort_order, is_active,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(slide.id)
        .bind(&slide.title)
        .bind(&slide.subtitle)
        .bind(&slide.image)
        .bind(&slide.button_text)
        .bind(&slide.button_link)
        .bind(slide.order)
        .bind(slide.is_active)
        .bind(slide.created_at)
        .bind(slide.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, slide), fields(id = %slide.id))]
    async fn update(&self, slide: &Slide) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE slides
            SET title = $2, subtitle = $3, image = $4, button_text = $5, button_link = $6,
                sort_order = $7, is_active = $8
            WHERE id = $1
            ",
        )
        .bind(slide.id)
        .bind(&slide.title)
        .bind(&slide.subtitle)
        .bind(&slide.image)
        .bind(&slide.button_text)
        .bind(&slide.button_link)
        .bind(slide.order)
        .bind(slide.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("Slide", slide.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM slides WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
