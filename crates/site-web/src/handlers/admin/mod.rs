//! Admin JSON API
//!
//! Every route except login and refresh requires an [`AdminAuth`] bearer token.
//!
//! [`AdminAuth`]: crate::extractors::AdminAuth

pub mod auth;
pub mod catalog;
pub mod contacts;
pub mod content;
pub mod telegram;
pub mod uploads;

use crate::response::ApiError;

/// Unknown admin path; answered as JSON, never as the HTML 404 page
pub async fn not_found() -> ApiError {
    ApiError::Service(site_service::ServiceError::not_found("Route", "admin"))
}
