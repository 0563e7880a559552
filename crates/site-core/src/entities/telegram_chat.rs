//! Telegram chat subscribed to lead notifications

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Recipient registered through the bot's `/start` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramChat {
    pub id: Uuid,
    /// Chat identifier issued by Telegram
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TelegramChat {
    pub fn new(chat_id: i64, username: Option<String>, first_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            chat_id,
            username,
            first_name,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// `@username`, the first name, or the raw chat id
    pub fn display_name(&self) -> String {
        match (&self.username, &self.first_name) {
            (Some(username), _) => format!("@{username}"),
            (None, Some(first_name)) => first_name.clone(),
            (None, None) => self.chat_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let chat = TelegramChat::new(42, Some("owner".to_string()), Some("Max".to_string()));
        assert_eq!(chat.display_name(), "@owner");

        let chat = TelegramChat::new(42, None, Some("Max".to_string()));
        assert_eq!(chat.display_name(), "Max");

        let chat = TelegramChat::new(-100_123, None, None);
        assert_eq!(chat.display_name(), "-100123");
    }
}
