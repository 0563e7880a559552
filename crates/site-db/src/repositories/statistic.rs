//! PostgreSQL implementation of StatisticRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::Statistic;
use site_core::traits::{RepoResult, StatisticRepository};

use crate::models::StatisticModel;

use super::error::{map_db_error, row_not_found};

const SELECT_STATISTICS: &str = r"
    SELECT id, icon_class, number, suffix, label, sort_order, is_active, created_at, updated_at
    FROM statistics
";

/// PostgreSQL implementation of StatisticRepository
#[derive(Clone)]
pub struct PgStatisticRepository {
    pool: PgPool,
}

impl PgStatisticRepository {
    /// Create a new PgStatisticRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatisticRepository for PgStatisticRepository {
    #[instrument(skip(self))]
    async fn list_active(&self) -> RepoResult<Vec<Statistic>> {
        let sql = format!("{SELECT_STATISTICS} WHERE is_active ORDER BY sort_order, created_at");
        let results = sqlx::query_as::<_, StatisticModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Statistic::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Statistic>> {
        let sql = format!("{SELECT_STATISTICS} ORDER BY sort_order, created_at");
        let results = sqlx::query_as::<_, StatisticModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Statistic::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Statistic>> {
        let sql = format!("{SELECT_STATISTICS} WHERE id = $1");
        let result = sqlx::query_as::<_, StatisticModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Statistic::from))
    }

    #[instrument(skip(self))]
    async fn find_by_label(&self, label: &str) -> RepoResult<Option<Statistic>> {
        let sql = format!("{SELECT_STATISTICS} WHERE label = $1 ORDER BY created_at LIMIT 1");
        let result = sqlx::query_as::<_, StatisticModel>(&sql)
            .bind(label)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Statistic::from))
    }

    #[instrument(skip(self, statistic), fields(id = %statistic.id))]
    async fn create(&self, statistic: &Statistic) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO statistics (
                id, icon_class, number, suffix, label, sort_order, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(statistic.id)
        .bind(&statistic.icon_class)
        .bind(statistic.number)
        .bind(&statistic.suffix)
        .bind(&statistic.label)
        .bind(statistic.order)
        .bind(statistic.is_active)
        .bind(statistic.created_at)
        .bind(statistic.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, statistic), fields(id = %statistic.id))]
    async fn update(&self, statistic: &Statistic) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE statistics
            SET icon_class = $2, number = $3, suffix = $4, label = $5, sort_order = $6,
                is_active = $7
            WHERE id = $1
            ",
        )
        .bind(statistic.id)
        .bind(&statistic.icon_class)
        .bind(statistic.number)
        .bind(&statistic.suffix)
        .bind(&statistic.label)
        .bind(statistic.order)
        .bind(statistic.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("Statistic", statistic.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM statistics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
