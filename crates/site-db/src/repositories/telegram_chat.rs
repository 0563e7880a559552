//! PostgreSQL implementation of TelegramChatRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use site_core::entities::TelegramChat;
use site_core::traits::{RepoResult, TelegramChatRepository};

use crate::models::TelegramChatModel;

use super::error::map_db_error;

const SELECT_CHATS: &str = r"
    SELECT id, chat_id, username, first_name, is_active, created_at, updated_at
    FROM telegram_chats
";

/// PostgreSQL implementation of TelegramChatRepository
#[derive(Clone)]
pub struct PgTelegramChatRepository {
    pool: PgPool,
}

impl PgTelegramChatRepository {
    /// Create a new PgTelegramChatRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TelegramChatRepository for PgTelegramChatRepository {
    #[instrument(skip(self))]
    async fn list_active(&self) -> RepoResult<Vec<TelegramChat>> {
        let sql = format!("{SELECT_CHATS} WHERE is_active ORDER BY created_at");
        let results = sqlx::query_as::<_, TelegramChatModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(TelegramChat::from).collect())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<TelegramChat>> {
        let sql = format!("{SELECT_CHATS} ORDER BY created_at DESC");
        let results = sqlx::query_as::<_, TelegramChatModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(TelegramChat::from).collect())
    }

    #[instrument(skip(self))]
    async fn upsert(
        &self,
        chat_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> RepoResult<TelegramChat> {
        let result = sqlx::query_as::<_, TelegramChatModel>(
            r"
            INSERT INTO telegram_chats (id, chat_id, username, first_name, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            ON CONFLICT (chat_id) DO UPDATE
            SET username = EXCLUDED.username,
                first_name = EXCLUDED.first_name,
                is_active = TRUE
            RETURNING id, chat_id, username, first_name, is_active, created_at, updated_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(chat_id)
        .bind(username)
        .bind(first_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(TelegramChat::from(result))
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: Uuid, is_active: bool) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE telegram_chats SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM telegram_chats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
