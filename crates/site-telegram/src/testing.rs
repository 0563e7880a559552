//! In-memory chat store shared by unit tests

use parking_lot::Mutex;

use async_trait::async_trait;
use site_core::{DomainError, RepoResult, TelegramChat, TelegramChatRepository};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryChats {
    pub chats: Mutex<Vec<TelegramChat>>,
    pub fail: bool,
}

impl MemoryChats {
    pub fn with_chats(ids: &[i64]) -> Self {
        let chats = ids
            .iter()
            .map(|id| TelegramChat::new(*id, None, None))
            .collect();
        Self {
            chats: Mutex::new(chats),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            chats: Mutex::default(),
            fail: true,
        }
    }

    pub fn snapshot(&self) -> Vec<TelegramChat> {
        self.chats.lock().clone()
    }
}

#[async_trait]
impl TelegramChatRepository for MemoryChats {
    async fn list_active(&self) -> RepoResult<Vec<TelegramChat>> {
        if self.fail {
            return Err(DomainError::DatabaseError("down".to_string()));
        }
        Ok(self.snapshot().into_iter().filter(|c| c.is_active).collect())
    }

    async fn list(&self) -> RepoResult<Vec<TelegramChat>> {
        Ok(self.snapshot())
    }

    async fn upsert(
        &self,
        chat_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> RepoResult<TelegramChat> {
        if self.fail {
            return Err(DomainError::DatabaseError("down".to_string()));
        }
        let mut chats = self.chats.lock();
        if let Some(chat) = chats.iter_mut().find(|c| c.chat_id == chat_id) {
            chat.username = username.map(str::to_string);
            chat.first_name = first_name.map(str::to_string);
            chat.is_active = true;
            return Ok(chat.clone());
        }
        let chat = TelegramChat::new(
            chat_id,
            username.map(str::to_string),
            first_name.map(str::to_string),
        );
        chats.push(chat.clone());
        Ok(chat)
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> RepoResult<bool> {
        let mut chats = self.chats.lock();
        Ok(chats
            .iter_mut()
            .find(|c| c.id == id)
            .map(|c| c.is_active = is_active)
            .is_some())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut chats = self.chats.lock();
        let before = chats.len();
        chats.retain(|c| c.id != id);
        Ok(chats.len() != before)
    }
}
