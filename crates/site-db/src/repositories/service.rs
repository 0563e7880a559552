//! PostgreSQL implementation of ServiceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::Service;
use site_core::error::DomainError;
use site_core::traits::{CatalogQuery, ListQuery, Page, RepoResult, ServiceRepository};

use crate::models::ServiceModel;

use super::error::{map_db_error, map_unique_violation, row_not_found};
use super::sql::{like_pattern, page_bounds};

const SELECT_SERVICES: &str = r"
    SELECT id, name, slug, category_id, icon, image, description, price_from, price_unit,
           sort_order, is_active, created_at, updated_at
    FROM services
";

const CATALOG_FILTER: &str = r"
    WHERE is_active
      AND ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)
";

const LIST_FILTER: &str = r"
    WHERE ($1::text IS NULL OR name ILIKE $1 OR slug ILIKE $1 OR description ILIKE $1)
      AND ($2::bool IS NULL OR is_active = $2)
";

/// PostgreSQL implementation of ServiceRepository
#[derive(Clone)]
pub struct PgServiceRepository {
    pool: PgPool,
}

impl PgServiceRepository {
    /// Create a new PgServiceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for PgServiceRepository {
    #[instrument(skip(self))]
    async fn list_active(&self, limit: Option<i64>) -> RepoResult<Vec<Service>> {
        // LIMIT NULL means no limit
        let sql = format!("{SELECT_SERVICES} WHERE is_active ORDER BY sort_order, name LIMIT $1");
        let results = sqlx::query_as::<_, ServiceModel>(&sql)
            .bind(limit.map(|l| l.max(0)))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Service::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_active_by_name(&self) -> RepoResult<Vec<Service>> {
        let sql = format!("{SELECT_SERVICES} WHERE is_active ORDER BY name");
        let results = sqlx::query_as::<_, ServiceModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Service::from).collect())
    }

    #[instrument(skip(self))]
    async fn search_active(&self, query: &CatalogQuery) -> RepoResult<Page<Service>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);
        let pattern = like_pattern(query.search.as_deref());

        let sql = format!(
            "{SELECT_SERVICES} {CATALOG_FILTER} ORDER BY sort_order, name LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ServiceModel>(&sql)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM services {CATALOG_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(Service::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_active_by_slug(&self, slug: &str) -> RepoResult<Option<Service>> {
        let sql = format!("{SELECT_SERVICES} WHERE slug = $1 AND is_active");
        let result = sqlx::query_as::<_, ServiceModel>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Service::from))
    }

    #[instrument(skip(self, service), fields(id = %service.id))]
    async fn find_related(&self, service: &Service, limit: i64) -> RepoResult<Vec<Service>> {
        let sql = format!(
            r"{SELECT_SERVICES}
            WHERE is_active AND id <> $1
            ORDER BY CASE WHEN $2::uuid IS NOT NULL AND category_id = $2 THEN 0 ELSE 1 END,
                     sort_order, name
            LIMIT $3"
        );
        let results = sqlx::query_as::<_, ServiceModel>(&sql)
            .bind(service.id)
            .bind(service.category_id)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Service::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_with_active_works(&self) -> RepoResult<Vec<Service>> {
        let sql = format!(
            r"{SELECT_SERVICES} s
            WHERE s.is_active AND EXISTS (
                SELECT 1 FROM portfolio_items p WHERE p.service_id = s.id AND p.is_active
            )
            ORDER BY s.sort_order, s.name"
        );
        let results = sqlx::query_as::<_, ServiceModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Service::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Service>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);
        let pattern = like_pattern(query.search.as_deref());

        let sql = format!(
            "{SELECT_SERVICES} {LIST_FILTER} ORDER BY sort_order, name LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, ServiceModel>(&sql)
            .bind(&pattern)
            .bind(query.is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM services {LIST_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&pattern)
            .bind(query.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(Service::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Service>> {
        let sql = format!("{SELECT_SERVICES} WHERE id = $1");
        let result = sqlx::query_as::<_, ServiceModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Service::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Service>> {
        let sql = format!("{SELECT_SERVICES} WHERE name = $1 ORDER BY created_at LIMIT 1");
        let result = sqlx::query_as::<_, ServiceModel>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Service::from))
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM services
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

    #[instrument(skip(self, service), fields(id = %service.id))]
    async fn create(&self, service: &Service) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO services (
                id, name, slug, category_id, icon, image, description, price_from,
                price_unit, sort_order, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(service.id)
        .bind(&service.name)
        .bind(&service.slug)
        .bind(service.category_id)
        .bind(&service.icon)
        .bind(&service.image)
        .bind(&service.description)
        .bind(service.price_from)
        .bind(&service.price_unit)
        .bind(service.order)
        .bind(service.is_active)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugTaken(service.slug.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, service), fields(id = %service.id))]
    async fn update(&self, service: &Service) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE services
            SET name = $2, slug = $3, category_id = $4, icon = $5, image = $6, description = $7,
                price_from = $8, price_unit = $9, sort_order = $10, is_active = $11
            WHERE id = $1
            ",
        )
        .bind(service.id)
        .bind(&service.name)
        .bind(&service.slug)
        .bind(service.category_id)
        .bind(&service.icon)
        .bind(&service.image)
        .bind(&service.description)
        .bind(service.price_from)
        .bind(&service.price_unit)
        .bind(service.order)
        .bind(service.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugTaken(service.slug.clone())))?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("Service", service.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
