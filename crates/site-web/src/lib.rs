//! # site-web
//!
//! HTTP server built with Axum: server-rendered public pages, the contact
//! form endpoint and the JSON admin API.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
