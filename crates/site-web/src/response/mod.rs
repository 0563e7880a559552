//! Response types and error handling
//!
//! The admin API answers errors as `{"error": {code, message, details?}}`.
//! Public pages answer with an HTML error page, rendered by
//! [`crate::middleware::render_error_pages`] from the [`ErrorPage`] marker a
//! [`PageError`] leaves on its response.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use site_common::{AppError, ErrorResponse};
use site_service::ServiceError;
use thiserror::Error;
use tracing::error;

/// Failure of an admin API handler or extractor
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    /// Malformed path, query or body; `code` names which
    #[error("{message}")]
    BadRequest { code: &'static str, message: String },

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,
}

fn status_from_u16(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl ApiError {
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "INVALID_PATH_PARAMETER",
            message: msg.into(),
        }
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "INVALID_QUERY_PARAMETER",
            message: msg.into(),
        }
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "INVALID_BODY",
            message: msg.into(),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => status_from_u16(e.status_code()),
            Self::Service(e) => status_from_u16(e.status_code()),
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::MissingAuth | Self::InvalidAuthFormat => StatusCode::UNAUTHORIZED,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::BadRequest { code, .. } => *code,
            Self::MissingAuth => "MISSING_AUTHORIZATION",
            Self::InvalidAuthFormat => "INVALID_AUTHORIZATION_FORMAT",
        }
    }

    /// Per-field messages for form failures
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Service(e) => e.field_errors().and_then(|f| serde_json::to_value(f).ok()),
            _ => None,
        }
    }

    fn retry_after(&self) -> Option<u64> {
        match self {
            Self::App(e) | Self::Service(ServiceError::App(e)) => e.retry_after(),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = ?self, "admin API request failed");
        }

        let body = ErrorBody {
            error: ErrorResponse {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let retry_after = self.retry_after();

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// 201 wrapper
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// Marker left in response extensions for the error-page renderer
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: Option<String>,
}

impl ErrorPage {
    pub fn for_status(status: StatusCode) -> Self {
        let title = match status {
            StatusCode::NOT_FOUND => "Страница не найдена",
            StatusCode::BAD_REQUEST => "Некорректный запрос",
            StatusCode::TOO_MANY_REQUESTS => "Слишком много запросов",
            _ => "Ошибка сервера",
        };
        Self {
            status,
            title,
            message: None,
        }
    }
}

/// Failure of a public page handler
#[derive(Debug, Error)]
pub enum PageError {
    #[error("page not found")]
    NotFound,

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl PageError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Service(e) => status_from_u16(e.status_code()),
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Page failed");
        }

        let mut response = status.into_response();
        response.extensions_mut().insert(ErrorPage::for_status(status));
        response
    }
}

pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_form_error_details() {
        let err = ApiError::from(ServiceError::field("slug", "taken"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        let details = err.details().unwrap();
        assert_eq!(details["slug"], "taken");
    }

    #[test]
    fn test_domain_conflict() {
        let err = ApiError::from(ServiceError::from(site_core::DomainError::SlugTaken(
            "vyveski".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "SLUG_TAKEN");
    }

    #[test]
    fn test_bad_request_codes() {
        let err = ApiError::invalid_path("not a uuid");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_PATH_PARAMETER");
        assert_eq!(err.to_string(), "not a uuid");
    }

    #[test]
    fn test_login_locked_sets_retry_after() {
        let response = ApiError::from(AppError::LoginLocked {
            retry_after_secs: 3600,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "3600");
    }

    #[test]
    fn test_missing_auth_is_unauthorized() {
        assert_eq!(ApiError::MissingAuth.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_page_error_carries_marker() {
        let response = PageError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let marker = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(marker.title, "Страница не найдена");
    }
}
