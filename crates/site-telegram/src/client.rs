//! HTTP client for the Telegram Bot API.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{TelegramError, TelegramResult};
use crate::types::{ApiResponse, SendMessage, Update};

/// Public Bot API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Per-request timeout for `sendMessage`
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Extra time a long poll is allowed beyond its server-side `timeout`
const POLL_GRACE: Duration = Duration::from_secs(5);

/// Bot API client bound to one token
#[derive(Clone)]
pub struct BotClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for BotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl BotClient {
    /// Create a client for `token` against `api_base` (no trailing `/bot...`)
    pub fn new(token: impl Into<String>, api_base: &str) -> TelegramResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TelegramError::MissingToken);
        }
        let base_url = api_base.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TelegramError::InvalidBaseUrl(api_base.to_string()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// First characters of the token, for startup logs
    pub fn token_hint(&self) -> String {
        let prefix: String = self.token.chars().take(10).collect();
        format!("{prefix}...")
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }

    /// `sendMessage`; `parse_mode` is `Some("HTML")` for formatted notices
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
    ) -> TelegramResult<()> {
        let body = SendMessage {
            chat_id,
            text,
            parse_mode,
        };
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&body)
            .timeout(SEND_TIMEOUT)
            .send()
            .await?;

        decode::<serde_json::Value>(response).await?;
        debug!(chat_id, "sendMessage delivered");
        Ok(())
    }

    /// Long-poll `getUpdates` starting at `offset`
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> TelegramResult<Vec<Update>> {
        let response = self
            .http
            .get(self.method_url("getUpdates"))
            .query(&[("offset", offset), ("timeout", timeout_secs as i64)])
            .timeout(Duration::from_secs(timeout_secs) + POLL_GRACE)
            .send()
            .await?;

        decode(response).await
    }
}

/// Map the Bot API envelope onto `TelegramResult`
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> TelegramResult<T> {
    let status = response.status();
    let text = response.text().await?;
    let envelope: Option<ApiResponse<T>> = serde_json::from_str(&text).ok();

    let description = || {
        envelope
            .as_ref()
            .and_then(|e| e.description.clone())
            .unwrap_or_else(|| text.clone())
    };

    if status == StatusCode::CONFLICT {
        return Err(TelegramError::Conflict(description()));
    }
    if !status.is_success() {
        return Err(TelegramError::Api {
            status,
            description: description(),
        });
    }

    match envelope {
        Some(ApiResponse {
            ok: true,
            result: Some(result),
            ..
        }) => Ok(result),
        Some(ApiResponse {
            error_code: Some(409),
            description,
            ..
        }) => Err(TelegramError::Conflict(description.unwrap_or_default())),
        Some(envelope) => Err(TelegramError::Api {
            status: envelope
                .error_code
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(status),
            description: envelope.description.unwrap_or_else(|| "ok=false".to_string()),
        }),
        None => Err(TelegramError::Api {
            status,
            description: format!("unreadable response body: {text}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> BotClient {
        BotClient::new("123:abc", &server.uri()).unwrap()
    }

    #[test]
    fn test_rejects_empty_token_and_bad_base() {
        assert!(matches!(
            BotClient::new("  ", DEFAULT_API_BASE),
            Err(TelegramError::MissingToken)
        ));
        assert!(matches!(
            BotClient::new("123:abc", "api.telegram.org"),
            Err(TelegramError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = BotClient::new("123456789:secret", DEFAULT_API_BASE).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
        assert_eq!(client.token_hint(), "123456789:...");
    }

    #[tokio::test]
    async fn test_send_message_posts_html() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_json(serde_json::json!({
                "chat_id": 42,
                "text": "<b>hi</b>",
                "parse_mode": "HTML"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"message_id": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .send_message(42, "<b>hi</b>", Some("HTML"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_message_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .mount(&server)
            .await;

        let err = client(&server).send_message(42, "hi", None).await.unwrap_err();
        match err {
            TelegramError::Api {
                status,
                description,
            } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert!(description.contains("blocked"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_updates_passes_offset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bot123:abc/getUpdates"))
            .and(query_param("offset", "11"))
            .and(query_param("timeout", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": [
                    {"update_id": 11, "message": {"chat": {"id": 5, "first_name": "Max"}, "text": "/start"}}
                ]
            })))
            .mount(&server)
            .await;

        let updates = client(&server).get_updates(11, 10).await.unwrap();
        assert_eq!(updates.len(), 1);
        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 5);
        assert_eq!(message.text.as_deref(), Some("/start"));
    }

    #[tokio::test]
    async fn test_get_updates_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 409,
                "description": "Conflict: terminated by other getUpdates request"
            })))
            .mount(&server)
            .await;

        let err = client(&server).get_updates(0, 10).await.unwrap_err();
        assert!(err.is_conflict());
    }
}
