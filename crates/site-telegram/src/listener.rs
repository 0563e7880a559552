//! Long-poll loop that registers subscribers through `/start`

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use site_core::TelegramChatRepository;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::client::BotClient;
use crate::error::{TelegramError, TelegramResult};
use crate::types::{Message, Update};

/// Reply to a successful `/start`
pub const SUBSCRIBED_TEXT: &str = "✅ Вы успешно подписаны на уведомления о новых заявках!";

/// Reply to any other text
pub const HINT_TEXT: &str = "Отправьте /start для подписки на уведомления о новых заявках.";

/// Pauses between polls
#[derive(Debug, Clone, Copy)]
pub struct ListenerTimings {
    /// After a poll that returned nothing
    pub idle: Duration,
    /// After a network failure or a 5xx/429 from the API
    pub transient: Duration,
    /// After a 409 (another `getUpdates` consumer holds the token)
    pub conflict: Duration,
    /// Server-side long-poll timeout in seconds
    pub poll_timeout_secs: u64,
}

impl Default for ListenerTimings {
    fn default() -> Self {
        Self {
            idle: Duration::from_secs(1),
            transient: Duration::from_secs(5),
            conflict: Duration::from_secs(2),
            poll_timeout_secs: 10,
        }
    }
}

/// Outcome of one loop pass
#[derive(Debug, PartialEq, Eq)]
enum Tick {
    Processed,
    Idle,
    Conflict,
    Transient,
}

/// Whether `text` is a `/start` command, addressed or not, with or without payload
fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    let command = command.split('@').next().unwrap_or_default();
    command == "/start"
}

/// Bot update consumer
pub struct Listener {
    client: BotClient,
    chats: Arc<dyn TelegramChatRepository>,
    timings: ListenerTimings,
    /// Shared with the supervisor so a restarted listener resumes here
    offset: Arc<AtomicI64>,
}

impl Listener {
    pub fn new(client: BotClient, chats: Arc<dyn TelegramChatRepository>) -> Self {
        Self {
            client,
            chats,
            timings: ListenerTimings::default(),
            offset: Arc::new(AtomicI64::new(0)),
        }
    }

    #[must_use]
    pub fn with_timings(mut self, timings: ListenerTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Track the offset in a cell that outlives this listener
    #[must_use]
    pub fn with_shared_offset(mut self, offset: Arc<AtomicI64>) -> Self {
        self.offset = offset;
        self
    }

    /// Next `getUpdates` offset
    pub fn offset(&self) -> i64 {
        self.offset.load(Ordering::Acquire)
    }

    /// Poll until shutdown is signalled
    ///
    /// Returns `Err` only for failures polling cannot recover from (the
    /// chat store going away); the supervisor decides whether to restart.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> TelegramResult<()> {
        info!(
            token = %self.client.token_hint(),
            offset = self.offset(),
            "Telegram listener started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let poll = self.client.get_updates(self.offset(), self.timings.poll_timeout_secs);
            let result = tokio::select! {
                result = poll => result,
                _ = shutdown.changed() => break,
            };

            let pause = match self.tick(result).await? {
                Tick::Processed => continue,
                Tick::Idle => self.timings.idle,
                Tick::Conflict => self.timings.conflict,
                Tick::Transient => self.timings.transient,
            };

            tokio::select! {
                () = tokio::time::sleep(pause) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!(offset = self.offset(), "Telegram listener stopped");
        Ok(())
    }

    async fn tick(&mut self, result: TelegramResult<Vec<Update>>) -> TelegramResult<Tick> {
        match result {
            Ok(updates) if updates.is_empty() => Ok(Tick::Idle),
            Ok(updates) => {
                for update in updates {
                    self.offset.fetch_max(update.update_id + 1, Ordering::AcqRel);
                    if let Some(message) = update.message {
                        self.handle_message(message).await?;
                    }
                }
                Ok(Tick::Processed)
            }
            Err(e) if e.is_conflict() => {
                warn!(error = %e, "getUpdates conflict; another consumer is polling");
                Ok(Tick::Conflict)
            }
            Err(e) => {
                if e.is_transient() {
                    warn!(error = %e, "getUpdates failed; retrying");
                } else {
                    error!(error = %e, "getUpdates rejected");
                }
                Ok(Tick::Transient)
            }
        }
    }

    /// Handle one inbound message; only store failures propagate
    pub async fn handle_message(&self, message: Message) -> TelegramResult<()> {
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };
        let chat = &message.chat;

        let reply = if is_start_command(text) {
            let stored = self
                .chats
                .upsert(chat.id, chat.username.as_deref(), chat.first_name.as_deref())
                .await
                .map_err(TelegramError::Repository)?;
            info!(chat_id = chat.id, name = %stored.display_name(), "Chat subscribed");
            SUBSCRIBED_TEXT
        } else {
            debug!(chat_id = chat.id, "Non-command message");
            HINT_TEXT
        };

        if let Err(e) = self.client.send_message(chat.id, reply, None).await {
            warn!(chat_id = chat.id, error = %e, "Reply failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryChats;
    use crate::types::Chat;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123:abc";

    fn message(chat_id: i64, text: &str) -> Message {
        Message {
            chat: Chat {
                id: chat_id,
                username: Some("owner".to_string()),
                first_name: Some("Max".to_string()),
            },
            text: Some(text.to_string()),
        }
    }

    async fn mount_send(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "result": {}})),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn test_start_command_forms() {
        assert!(is_start_command("/start"));
        assert!(is_start_command("/start@bright_city_bot"));
        assert!(is_start_command("/start promo"));
        assert!(is_start_command("  /start"));
        assert!(!is_start_command("/started"));
        assert!(!is_start_command("start"));
        assert!(!is_start_command("/help"));
    }

    #[tokio::test]
    async fn test_start_subscribes_and_confirms() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(
                serde_json::json!({"chat_id": 7, "text": SUBSCRIBED_TEXT}),
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "result": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let chats = Arc::new(MemoryChats::default());
        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let listener = Listener::new(client, chats.clone());

        listener.handle_message(message(7, "/start")).await.unwrap();

        let stored = chats.snapshot();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].chat_id, 7);
        assert_eq!(stored[0].username.as_deref(), Some("owner"));
    }

    #[tokio::test]
    async fn test_repeated_start_reactivates_single_row() {
        let server = MockServer::start().await;
        mount_send(&server).await;

        let chats = Arc::new(MemoryChats::with_chats(&[7]));
        chats.chats.lock()[0].is_active = false;
        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let listener = Listener::new(client, chats.clone());

        listener.handle_message(message(7, "/start")).await.unwrap();
        listener.handle_message(message(7, "/start")).await.unwrap();

        let stored = chats.snapshot();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].is_active);
    }

    #[tokio::test]
    async fn test_other_text_gets_hint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(serde_json::json!({"text": HINT_TEXT})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "result": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let chats = Arc::new(MemoryChats::default());
        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let listener = Listener::new(client, chats.clone());

        listener.handle_message(message(7, "привет")).await.unwrap();
        assert!(chats.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let server = MockServer::start().await;
        mount_send(&server).await;

        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let listener = Listener::new(client, Arc::new(MemoryChats::failing()));

        let result = listener.handle_message(message(7, "/start")).await;
        assert!(matches!(result, Err(TelegramError::Repository(_))));
    }

    #[tokio::test]
    async fn test_offset_advances_past_processed_updates() {
        let server = MockServer::start().await;
        mount_send(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": [
                    {"update_id": 40, "message": {"chat": {"id": 7}, "text": "/start"}},
                    {"update_id": 41}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .and(query_param("offset", "42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "result": []})),
            )
            .mount(&server)
            .await;

        let chats = Arc::new(MemoryChats::default());
        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let mut listener = Listener::new(client, chats.clone()).with_timings(ListenerTimings {
            idle: Duration::from_millis(10),
            transient: Duration::from_millis(10),
            conflict: Duration::from_millis(10),
            poll_timeout_secs: 0,
        });

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            listener.run(rx).await.map(|()| listener.offset())
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        tx.send(true).unwrap();

        let offset = handle.await.unwrap().unwrap();
        assert_eq!(offset, 42);
        assert_eq!(chats.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_restarted_listener_resumes_after_store_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "result": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": [
                    {"update_id": 50, "message": {"chat": {"id": 7}, "text": "привет"}},
                    {"update_id": 51, "message": {"chat": {"id": 8}, "text": "/start"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .and(query_param("offset", "52"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "result": []})),
            )
            .mount(&server)
            .await;

        let timings = ListenerTimings {
            idle: Duration::from_millis(10),
            transient: Duration::from_millis(10),
            conflict: Duration::from_millis(10),
            poll_timeout_secs: 0,
        };
        let offset = Arc::new(AtomicI64::new(0));
        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let (tx, rx) = watch::channel(false);

        let mut failing = Listener::new(client.clone(), Arc::new(MemoryChats::failing()))
            .with_timings(timings)
            .with_shared_offset(offset.clone());
        let result = failing.run(rx.clone()).await;
        assert!(matches!(result, Err(TelegramError::Repository(_))));
        assert_eq!(offset.load(Ordering::Acquire), 52);

        let chats = Arc::new(MemoryChats::default());
        let mut restarted = Listener::new(client, chats.clone())
            .with_timings(timings)
            .with_shared_offset(offset.clone());
        let handle = tokio::spawn(async move { restarted.run(rx).await });

        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(true).unwrap();
        handle.await.unwrap().unwrap();

        assert_eq!(offset.load(Ordering::Acquire), 52);
        assert!(chats.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_conflict_keeps_polling() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 409,
                "description": "Conflict: terminated by other getUpdates request"
            })))
            .mount(&server)
            .await;

        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let mut listener = Listener::new(client, Arc::new(MemoryChats::default()));

        let result = listener
            .tick(Err(TelegramError::Conflict("busy".to_string())))
            .await
            .unwrap();
        assert_eq!(result, Tick::Conflict);

        let polled = listener.client.get_updates(0, 0).await;
        assert!(matches!(polled, Err(TelegramError::Conflict(_))));
    }
}
