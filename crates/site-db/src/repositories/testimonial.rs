//! PostgreSQL implementation of TestimonialRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::Testimonial;
use site_core::traits::{ListQuery, Page, RepoResult, TestimonialRepository};

use crate::models::TestimonialModel;

use super::error::{map_db_error, row_not_found};
use super::sql::{like_pattern, page_bounds};

const SELECT_TESTIMONIALS: &str = r"
    SELECT id, name, position, avatar, rating, text, sort_order, is_active, created_at, updated_at
    FROM testimonials
";

const LIST_FILTER: &str = r"
    WHERE ($1::text IS NULL OR name ILIKE $1 OR text ILIKE $1)
      AND ($2::bool IS NULL OR is_active = $2)
";

/// PostgreSQL implementation of TestimonialRepository
#[derive(Clone)]
pub struct PgTestimonialRepository {
    pool: PgPool,
}

impl PgTestimonialRepository {
    /// Create a new PgTestimonialRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TestimonialRepository for PgTestimonialRepository {
    #[instrument(skip(self))]
    async fn list_active(&self, limit: i64) -> RepoResult<Vec<Testimonial>> {
        let sql = format!(
            "{SELECT_TESTIMONIALS} WHERE is_active ORDER BY sort_order, created_at DESC LIMIT $1"
        );
        let results = sqlx::query_as::<_, TestimonialModel>(&sql)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Testimonial::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Testimonial>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);
        let pattern = like_pattern(query.search.as_deref());

        let sql = format!(
            "{SELECT_TESTIMONIALS} {LIST_FILTER} ORDER BY sort_order, created_at DESC LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, TestimonialModel>(&sql)
            .bind(&pattern)
            .bind(query.is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM testimonials {LIST_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&pattern)
            .bind(query.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(Testimonial::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Testimonial>> {
        let sql = format!("{SELECT_TESTIMONIALS} WHERE id = $1");
        let result = sqlx::query_as::<_, TestimonialModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Testimonial::from))
    }

    #[instrument(skip(self, testimonial), fields(id = %testimonial.id))]
    async fn create(&self, testimonial: &Testimonial) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO testimonials (
                id, name, position, avatar, rating, text, sort_order, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(testimonial.id)
        .bind(&testimonial.name)
        .bind(&testimonial.position)
        .bind(&testimonial.avatar)
        .bind(testimonial.rating)
        .bind(&testimonial.text)
        .bind(testimonial.order)
        .bind(testimonial.is_active)
        .bind(testimonial.created_at)
        .bind(testimonial.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, testimonial), fields(id = %testimonial.id))]
    async fn update(&self, testimonial: &Testimonial) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE testimonials
            SET name = $2, position = $3, avatar = $4, rating = $5, text = $6, sort_order = $7,
                is_active = $8
            WHERE id = $1
            ",
        )
        .bind(testimonial.id)
        .bind(&testimonial.name)
        .bind(&testimonial.position)
        .bind(&testimonial.avatar)
        .bind(testimonial.rating)
        .bind(&testimonial.text)
        .bind(testimonial.order)
        .bind(testimonial.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("Testimonial", testimonial.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
