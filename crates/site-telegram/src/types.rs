//! Bot API wire types (only the fields this crate reads or writes)

use serde::{Deserialize, Serialize};

/// Envelope every Bot API method returns
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

/// `sendMessage` request body
#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_without_message() {
        let raw = r#"{"ok":true,"result":[{"update_id":7,"edited_message":{}}]}"#;
        let parsed: ApiResponse<Vec<Update>> = serde_json::from_str(raw).unwrap();
        let updates = parsed.result.unwrap();
        assert_eq!(updates[0].update_id, 7);
        assert!(updates[0].message.is_none());
    }

    #[test]
    fn test_send_message_omits_parse_mode() {
        let body = SendMessage {
            chat_id: 42,
            text: "hi",
            parse_mode: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"chat_id":42,"text":"hi"}"#);
    }
}
