//! Service layer errors

use std::collections::BTreeMap;

use site_common::AppError;
use site_core::DomainError;

/// First message per invalid form field, keyed by field name
pub type FieldErrors = BTreeMap<String, String>;

/// Everything a service call can fail with
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    /// Contact form and admin payload failures, one message per field
    #[error("Invalid fields: {}", join_keys(.0))]
    Form(FieldErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_keys(errors: &FieldErrors) -> String {
    errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Single-field form error
    pub fn field(field: &str, msg: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), msg.into());
        Self::Form(errors)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Field errors when this is a form failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Form(errors) => Some(errors),
            _ => None,
        }
    }

    /// HTTP status for the admin API and error pages
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_validation() => 400,
            Self::Domain(e) if e.is_conflict() => 409,
            Self::Domain(_) => 500,
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::Form(_) => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Machine-readable code in JSON error bodies
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) | Self::Form(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string);
                    (field.to_string(), msg)
                })
            })
            .collect();
        Self::Form(fields)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Form(errors) => AppError::Validation(
                errors
                    .into_iter()
                    .map(|(field, msg)| format!("{field}: {msg}"))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Required"))]
        name: String,
    }

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Service", "vyveski");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Service not found: vyveski"));
    }

    #[test]
    fn test_domain_conflict_maps_to_409() {
        let err = ServiceError::from(DomainError::SlugTaken("banners".to_string()));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "SLUG_TAKEN");
    }

    #[test]
    fn test_validation_errors_become_field_map() {
        let err = ServiceError::from(
            Probe {
                name: String::new(),
            }
            .validate()
            .unwrap_err(),
        );
        assert_eq!(err.status_code(), 400);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("name").map(String::as_str), Some("Required"));
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::field("phone", "bad").into();
        assert_eq!(app_err.status_code(), 400);
        assert!(app_err.to_string().contains("phone: bad"));
    }
}
