//! PostgreSQL implementation of PortfolioRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::PortfolioItem;
use site_core::traits::{ListQuery, Page, PortfolioQuery, PortfolioRepository, RepoResult};

use crate::models::PortfolioItemModel;

use super::error::{map_db_error, row_not_found};
use super::sql::{like_pattern, page_bounds};

const SELECT_ITEMS: &str = r"
    SELECT id, title, service_id, description, image, client, date_completed, is_featured,
           is_active, created_at, updated_at
    FROM portfolio_items
";

/// Newest work first; undated items sink
const NEWEST_FIRST: &str = "ORDER BY date_completed DESC NULLS LAST, created_at DESC";

const PUBLIC_FILTER: &str = r"
    WHERE is_active
      AND ($1::text IS NULL OR service_id IN (SELECT id FROM services WHERE slug = $1))
      AND ($2::text IS NULL OR title ILIKE $2 OR description ILIKE $2 OR client ILIKE $2)
";

const LIST_FILTER: &str = r"
    WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1 OR client ILIKE $1)
      AND ($2::bool IS NULL OR is_active = $2)
";

/// PostgreSQL implementation of PortfolioRepository
#[derive(Clone)]
pub struct PgPortfolioRepository {
    pool: PgPool,
}

impl PgPortfolioRepository {
    /// Create a new PgPortfolioRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioRepository for PgPortfolioRepository {
    #[instrument(skip(self))]
    async fn list_featured(&self, limit: i64) -> RepoResult<Vec<PortfolioItem>> {
        let sql = format!("{SELECT_ITEMS} WHERE is_active AND is_featured {NEWEST_FIRST} LIMIT $1");
        let results = sqlx::query_as::<_, PortfolioItemModel>(&sql)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(PortfolioItem::from).collect())
    }

    #[instrument(skip(self))]
    async fn search_active(&self, query: &PortfolioQuery) -> RepoResult<Page<PortfolioItem>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);
        let service_slug = query
            .service_slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let pattern = like_pattern(query.search.as_deref());

        let sql = format!("{SELECT_ITEMS} {PUBLIC_FILTER} {NEWEST_FIRST} LIMIT $3 OFFSET $4");
        let rows = sqlx::query_as::<_, PortfolioItemModel>(&sql)
            .bind(service_slug)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM portfolio_items {PUBLIC_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(service_slug)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(PortfolioItem::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn list_active_by_service(
        &self,
        service_id: Uuid,
        limit: i64,
    ) -> RepoResult<Vec<PortfolioItem>> {
        let sql =
            format!("{SELECT_ITEMS} WHERE is_active AND service_id = $1 {NEWEST_FIRST} LIMIT $2");
        let results = sqlx::query_as::<_, PortfolioItemModel>(&sql)
            .bind(service_id)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(PortfolioItem::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_active_by_service(&self, service_id: Uuid) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM portfolio_items WHERE is_active AND service_id = $1",
        )
        .bind(service_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_all_active(&self) -> RepoResult<Vec<PortfolioItem>> {
        let sql = format!("{SELECT_ITEMS} WHERE is_active {NEWEST_FIRST}");
        let results = sqlx::query_as::<_, PortfolioItemModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(PortfolioItem::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<PortfolioItem>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);
        let pattern = like_pattern(query.search.as_deref());

        let sql = format!("{SELECT_ITEMS} {LIST_FILTER} {NEWEST_FIRST} LIMIT $3 OFFSET $4");
        let rows = sqlx::query_as::<_, PortfolioItemModel>(&sql)
            .bind(&pattern)
            .bind(query.is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM portfolio_items {LIST_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&pattern)
            .bind(query.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page {
            items: rows.into_iter().map(PortfolioItem::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<PortfolioItem>> {
        let sql = format!("{SELECT_ITEMS} WHERE id = $1");
        let result = sqlx::query_as::<_, PortfolioItemModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(PortfolioItem::from))
    }

    #[instrument(skip(self))]
    async fn find_by_title(&self, title: &str) -> RepoResult<Option<PortfolioItem>> {
        let sql = format!("{SELECT_ITEMS} WHERE title = $1 ORDER BY created_at LIMIT 1");
        let result = sqlx::query_as::<_, PortfolioItemModel>(&sql)
            .bind(title)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(PortfolioItem::from))
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn create(&self, item: &PortfolioItem) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO portfolio_items (
                id, title, service_id, description, image, client, date_completed, is_featured,
                is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(item.service_id)
        .bind(&item.description)
        .bind(&item.image)
        .bind(&item.client)
        .bind(item.date_completed)
        .bind(item.is_featured)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn update(&self, item: &PortfolioItem) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE portfolio_items
            SET title = $2, service_id = $3, description = $4, image = $5, client = $6,
                date_completed = $7, is_featured = $8, is_active = $9
            WHERE id = $1
            ",
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(item.service_id)
        .bind(&item.description)
        .bind(&item.image)
        .bind(&item.client)
        .bind(item.date_completed)
        .bind(item.is_featured)
        .bind(item.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("Portfolio item", item.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM portfolio_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
