//! Application error types
//!
//! Errors shared by the binaries, the auth helpers and the services. Each
//! variant knows its HTTP status and the code the admin API reports.

use serde::Serialize;
use site_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Account disabled")]
    AccountDisabled,

    /// Login attempts for a (username, address) pair are suspended
    #[error("Too many failed login attempts, try again in {retry_after_secs} seconds")]
    LoginLocked { retry_after_secs: u64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Redis counters for rate limits and lockouts
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// HTTP status and API code in one place
    fn parts(&self) -> (u16, &'static str) {
        match self {
            Self::InvalidCredentials => (401, "INVALID_CREDENTIALS"),
            Self::InvalidToken => (401, "INVALID_TOKEN"),
            Self::TokenExpired => (401, "TOKEN_EXPIRED"),
            Self::AccountDisabled => (403, "ACCOUNT_DISABLED"),
            Self::LoginLocked { .. } => (429, "LOGIN_LOCKED"),
            Self::Validation(_) => (400, "VALIDATION_ERROR"),
            Self::NotFound(_) => (404, "NOT_FOUND"),
            Self::Conflict(_) => (409, "CONFLICT"),
            Self::Database(_) => (500, "DATABASE_ERROR"),
            Self::Cache(_) => (500, "CACHE_ERROR"),
            Self::Config(_) => (500, "CONFIG_ERROR"),
            Self::Internal(_) => (500, "INTERNAL_ERROR"),
            Self::Domain(e) => {
                let status = if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                };
                (status, e.code())
            }
        }
    }

    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.parts().0
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.parts().1
    }

    /// Seconds a client should wait before retrying, when known
    #[must_use]
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::LoginLocked { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Body of an admin API error: `{"error": {code, message, details?}}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status_code(), 401);
        assert_eq!(AppError::AccountDisabled.status_code(), 403);
        assert_eq!(AppError::NotFound("service".to_string()).status_code(), 404);
        assert_eq!(AppError::Validation("test".to_string()).status_code(), 400);
        assert_eq!(AppError::LoginLocked { retry_after_secs: 60 }.status_code(), 429);
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        let err = AppError::from(DomainError::not_found("service", "koroba"));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");

        let err = AppError::from(DomainError::SlugTaken("koroba".to_string()));
        assert_eq!(err.status_code(), 409);

        let err = AppError::from(DomainError::InvalidPhone("123".to_string()));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_retry_after() {
        let err = AppError::LoginLocked { retry_after_secs: 120 };
        assert_eq!(err.retry_after(), Some(120));
        assert_eq!(
            err.to_string(),
            "Too many failed login attempts, try again in 120 seconds"
        );
        assert_eq!(AppError::InvalidToken.retry_after(), None);
    }

    #[test]
    fn test_error_response() {
        let err = AppError::NotFound("slide".to_string());
        let response = ErrorResponse::from(&err);

        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Resource not found: slide");
        assert!(response.details.is_none());
    }
}
