//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::ServiceCategory;
use site_core::error::DomainError;
use site_core::traits::{CategoryRepository, ListQuery, Page, RepoResult};

use crate::models::CategoryModel;

use super::error::{map_db_error, map_unique_violation, row_not_found};
use super::sql::{like_pattern, page_bounds};

const SELECT_CATEGORIES: &str = r"
    SELECT id, name, slug, sort_order, is_active, created_at, updated_at
    FROM service_categories
";

const LIST_FILTER: &str = r"
    WHERE ($1::text IS NULL OR name ILIKE $1 OR slug ILIKE $1)
      AND ($2::bool IS NULL OR is_active = $2)
";

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn list_active(&self) -> RepoResult<Vec<ServiceCategory>> {
        let sql = format!("{SELECT_CATEGORIES} WHERE is_active ORDER BY sort_order, name");
        let results = sqlx::query_as::<_, CategoryModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(ServiceCategory::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<ServiceCategory>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);
        let pattern = like_pattern(query.search.as_deref());

        let sql = format!(
            "{SELECT_CATEGORIES} {LIST_FILTER} ORDER BY sort_order, name LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, CategoryModel>(&sql)
            .bind(&pattern)
            .bind(query.is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM service_categories {LIST_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&pattern)
            .bind(query.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(ServiceCategory::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ServiceCategory>> {
        let sql = format!("{SELECT_CATEGORIES} WHERE id = $1");
        let result = sqlx::query_as::<_, CategoryModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(ServiceCategory::from))
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM service_categories
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            ",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, category), fields(id = %category.id))]
    async fn create(&self, category: &ServiceCategory) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO service_categories (id, name, slug, sort_order, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.order)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugTaken(category.slug.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, category), fields(id = %category.id))]
    async fn update(&self, category: &ServiceCategory) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE service_categories
            SET name = $2, slug = $3, sort_order = $4, is_active = $5
            WHERE id = $1
            ",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.order)
        .bind(category.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugTaken(category.slug.clone())))?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("Service category", category.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM service_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
