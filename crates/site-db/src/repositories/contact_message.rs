//! PostgreSQL implementation of ContactMessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::ContactMessage;
use site_core::traits::{ContactMessageRepository, ContactQuery, Page, RepoResult};
use site_core::value_objects::ContactStatus;

use crate::models::ContactMessageModel;

use super::error::{map_db_error, row_not_found};
use super::sql::{like_pattern, page_bounds};

const SELECT_MESSAGES: &str = r"
    SELECT id, name, phone, email, message, status, is_read, admin_notes, created_at, updated_at
    FROM contact_messages
";

const INBOX_FILTER: &str = r"
    WHERE ($1::text IS NULL OR status = $1)
      AND ($2::bool IS NULL OR is_read = $2)
      AND ($3::text IS NULL OR name ILIKE $3 OR phone ILIKE $3 OR email ILIKE $3
           OR message ILIKE $3)
";

/// PostgreSQL implementation of ContactMessageRepository
#[derive(Clone)]
pub struct PgContactMessageRepository {
    pool: PgPool,
}

impl PgContactMessageRepository {
    /// Create a new PgContactMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactMessageRepository for PgContactMessageRepository {
    #[instrument(skip(self, message), fields(id = %message.id))]
    async fn create(&self, message: &ContactMessage) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO contact_messages (
                id, name, phone, email, message, status, is_read, admin_notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(message.id)
        .bind(&message.name)
        .bind(&message.phone)
        .bind(&message.email)
        .bind(&message.message)
        .bind(message.status.as_str())
        .bind(message.is_read)
        .bind(&message.admin_notes)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ContactMessage>> {
        let sql = format!("{SELECT_MESSAGES} WHERE id = $1");
        let result = sqlx::query_as::<_, ContactMessageModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(ContactMessage::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ContactQuery) -> RepoResult<Page<ContactMessage>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);
        let status = query.status.map(ContactStatus::as_str);
        let pattern = like_pattern(query.search.as_deref());

        let sql = format!(
            "{SELECT_MESSAGES} {INBOX_FILTER} ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, ContactMessageModel>(&sql)
            .bind(status)
            .bind(query.is_read)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM contact_messages {INBOX_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(status)
            .bind(query.is_read)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let items = rows
            .into_iter()
            .map(ContactMessage::try_from)
            .collect::<RepoResult<Vec<_>>>()?;

        Ok(Page { items, total })
    }

    #[instrument(skip(self))]
    async fn count_unread(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_messages WHERE NOT is_read")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, message), fields(id = %message.id))]
    async fn update(&self, message: &ContactMessage) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE contact_messages
            SET status = $2, is_read = $3, admin_notes = $4
            WHERE id = $1
            ",
        )
        .bind(message.id)
        .bind(message.status.as_str())
        .bind(message.is_read)
        .bind(&message.admin_notes)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(row_not_found("Contact message", message.id));
        }

        Ok(())
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn mark_read(&self, ids: &[Uuid]) -> RepoResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result =
            sqlx::query("UPDATE contact_messages SET is_read = TRUE WHERE id = ANY($1)")
                .bind(ids)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn set_status(&self, ids: &[Uuid], status: ContactStatus) -> RepoResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            "UPDATE contact_messages SET status = $2, is_read = TRUE WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
