//! Bot API errors

use reqwest::StatusCode;
use site_core::DomainError;
use thiserror::Error;

/// Errors talking to the Bot API or recording subscriptions
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Telegram bot token is not configured")]
    MissingToken,

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Another poller holds the update stream
    #[error("getUpdates conflict: {0}")]
    Conflict(String),

    #[error("Bot API returned {status}: {description}")]
    Api {
        status: StatusCode,
        description: String,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

impl TelegramError {
    /// Worth retrying after a short pause
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Conflict(_) => true,
            Self::Api { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Result type for Bot API operations
pub type TelegramResult<T> = Result<T, TelegramError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let conflict = TelegramError::Conflict("terminated by other getUpdates".to_string());
        assert!(conflict.is_conflict());
        assert!(conflict.is_transient());

        let unauthorized = TelegramError::Api {
            status: StatusCode::UNAUTHORIZED,
            description: "Unauthorized".to_string(),
        };
        assert!(!unauthorized.is_transient());

        let overloaded = TelegramError::Api {
            status: StatusCode::BAD_GATEWAY,
            description: "Bad Gateway".to_string(),
        };
        assert!(overloaded.is_transient());

        assert!(!TelegramError::Repository(DomainError::DatabaseError("down".into())).is_transient());
    }
}
