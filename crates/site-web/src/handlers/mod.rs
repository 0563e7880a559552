//! Route handlers
//!
//! Public pages render templates; the admin API answers JSON.

pub mod admin;
pub mod contact;
pub mod health;
pub mod pages;
pub mod seo;

use axum::response::Html;
use serde::Serialize;

use crate::response::PageResult;
use crate::state::AppState;

pub(crate) fn render<T: Serialize>(state: &AppState, template: &str, data: &T) -> PageResult<Html<String>> {
    Ok(Html(state.templates().render(template, data)?))
}
