//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    #[error("Username already in use")]
    UsernameTaken,

    #[error("Telegram chat already registered: {0}")]
    ChatAlreadyRegistered(i64),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Shorthand for a lookup miss
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPhone(_) => "INVALID_PHONE",
            Self::InvalidStatus(_) => "INVALID_STATUS",

            Self::SlugTaken(_) => "SLUG_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::ChatAlreadyRegistered(_) => "CHAT_ALREADY_REGISTERED",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidPhone(_)
                | Self::InvalidStatus(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::SlugTaken(_) | Self::UsernameTaken | Self::ChatAlreadyRegistered(_)
        )
    }
}

impl From<crate::value_objects::PhoneError> for DomainError {
    fn from(err: crate::value_objects::PhoneError) -> Self {
        Self::InvalidPhone(err.to_string())
    }
}

impl From<crate::value_objects::ContactStatusParseError> for DomainError {
    fn from(err: crate::value_objects::ContactStatusParseError) -> Self {
        Self::InvalidStatus(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::not_found("service", "koroba");
        assert_eq!(err.code(), "NOT_FOUND");

        let err = DomainError::SlugTaken("koroba".to_string());
        assert_eq!(err.code(), "SLUG_TAKEN");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::not_found("slide", 1).is_not_found());
        assert!(DomainError::InvalidPhone("12345".to_string()).is_validation());
        assert!(DomainError::UsernameTaken.is_conflict());
        assert!(!DomainError::UsernameTaken.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::not_found("service", "koroba");
        assert_eq!(err.to_string(), "service not found: koroba");
    }

    #[test]
    fn test_phone_error_conversion() {
        let err: DomainError = crate::value_objects::Phone::parse("123").unwrap_err().into();
        assert!(matches!(err, DomainError::InvalidPhone(_)));
    }
}
