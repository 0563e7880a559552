//! Axum extractors for request handling
//!
//! Custom extractors for admin authentication, JSON bodies, query strings, path ids,
//! client address and AJAX detection.

mod auth;
mod client;
mod json;
mod path;
mod query;

pub use auth::AdminAuth;
pub use client::{client_ip, ClientIp, IsAjax};
pub use json::JsonBody;
pub use path::IdPath;
pub use query::ApiQuery;
