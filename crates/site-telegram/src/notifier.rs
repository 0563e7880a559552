//! Outbound lead notifications

use std::sync::Arc;

use async_trait::async_trait;
use site_core::{ContactNotice, DeliveryReport, Notifier, TelegramChatRepository};
use tracing::{error, info, instrument, warn};

use crate::client::BotClient;
use crate::format::format_contact_notice;

/// Sends each new lead to every active subscriber chat, one after another
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Option<BotClient>,
    chats: Arc<dyn TelegramChatRepository>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    /// `client` is `None` when no bot token is configured
    pub fn new(client: Option<BotClient>, chats: Arc<dyn TelegramChatRepository>) -> Self {
        Self { client, chats }
    }

    /// Send already formatted HTML to all active chats
    #[instrument(skip(self, text))]
    pub async fn broadcast(&self, text: &str) -> DeliveryReport {
        let Some(client) = &self.client else {
            warn!("Telegram bot token is not configured; notification skipped");
            return DeliveryReport::default();
        };

        let chats = match self.chats.list_active().await {
            Ok(chats) => chats,
            Err(e) => {
                error!(error = %e, "Failed to load Telegram recipients");
                return DeliveryReport::default();
            }
        };

        if chats.is_empty() {
            warn!("No active Telegram chats; notification skipped");
            return DeliveryReport::default();
        }

        let mut report = DeliveryReport::default();
        for chat in &chats {
            match client.send_message(chat.chat_id, text, Some("HTML")).await {
                Ok(()) => {
                    report.delivered += 1;
                    info!(chat_id = chat.chat_id, "Notification sent");
                }
                Err(e) => {
                    report.failed += 1;
                    error!(chat_id = chat.chat_id, error = %e, "Notification failed");
                }
            }
        }

        info!(
            delivered = report.delivered,
            failed = report.failed,
            "Telegram fan-out finished"
        );
        report
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify_contact(&self, notice: &ContactNotice) -> DeliveryReport {
        self.broadcast(&format_contact_notice(notice)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryChats;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123:abc";

    fn notice() -> ContactNotice {
        ContactNotice {
            name: "Иван".to_string(),
            phone: "+7 (914) 123-45-67".to_string(),
            email: None,
            message: String::new(),
            is_callback: true,
        }
    }

    fn ok_body() -> serde_json::Value {
        serde_json::json!({"ok": true, "result": {"message_id": 1}})
    }

    #[tokio::test]
    async fn test_skipped_without_token() {
        let notifier = TelegramNotifier::new(None, Arc::new(MemoryChats::with_chats(&[1])));
        assert!(notifier.notify_contact(&notice()).await.is_skipped());
    }

    #[tokio::test]
    async fn test_skipped_without_chats() {
        let server = MockServer::start().await;
        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let notifier = TelegramNotifier::new(Some(client), Arc::new(MemoryChats::default()));

        let report = notifier.notify_contact(&notice()).await;
        assert!(report.is_skipped());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repository_failure_skips() {
        let server = MockServer::start().await;
        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let notifier = TelegramNotifier::new(Some(client), Arc::new(MemoryChats::failing()));

        assert!(notifier.notify_contact(&notice()).await.is_skipped());
    }

    #[tokio::test]
    async fn test_partial_failure_counts_as_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(serde_json::json!({"chat_id": 2})))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(serde_json::json!({"parse_mode": "HTML"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .mount(&server)
            .await;

        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let chats = Arc::new(MemoryChats::with_chats(&[1, 2, 3]));
        let notifier = TelegramNotifier::new(Some(client), chats);

        let report = notifier.notify_contact(&notice()).await;
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 1);
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_inactive_chats_not_contacted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let chats = Arc::new(MemoryChats::with_chats(&[1, 2]));
        {
            let mut guard = chats.chats.lock();
            guard[1].is_active = false;
        }
        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let notifier = TelegramNotifier::new(Some(client), chats);

        let report = notifier.notify_contact(&notice()).await;
        assert_eq!(report.delivered, 1);
    }

    #[tokio::test]
    async fn test_all_failed_is_not_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = BotClient::new(TOKEN, &server.uri()).unwrap();
        let notifier =
            TelegramNotifier::new(Some(client), Arc::new(MemoryChats::with_chats(&[1, 2])));

        let report = notifier.notify_contact(&notice()).await;
        assert_eq!(report.failed, 2);
        assert!(!report.is_success());
    }
}
