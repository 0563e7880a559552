//! Contact message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for contact_messages table
#[derive(Debug, Clone, FromRow)]
pub struct ContactMessageModel {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: String,
    /// One of `new`, `in_progress`, `completed`, `cancelled`
    pub status: String,
    pub is_read: bool,
    pub admin_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
