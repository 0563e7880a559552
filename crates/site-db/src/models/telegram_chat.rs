//! Telegram chat database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for telegram_chats table
#[derive(Debug, Clone, FromRow)]
pub struct TelegramChatModel {
    pub id: Uuid,
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
