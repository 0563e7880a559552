//! Route definitions
//!
//! Public pages at the site root, the admin API nested under the admin mount
//! path, and file serving for media and static assets.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use site_common::AppConfig;
use tower_http::services::ServeDir;

use crate::handlers::admin::{auth, catalog, contacts, content, telegram, uploads};
use crate::handlers::{admin, contact, health, pages, seo};
use crate::state::AppState;

/// Multipart framing allowance on top of the file size limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main router (public site, admin API and files)
pub fn create_router(config: &AppConfig) -> Router<AppState> {
    let admin_api = format!("{}/api", config.admin.mount_path());

    Router::new()
        .merge(public_routes())
        .merge(health_routes())
        .nest(&admin_api, admin_routes(config))
        .nest_service("/media", ServeDir::new(&config.storage.media_root))
        .nest_service("/static", ServeDir::new(&config.storage.static_root))
        .fallback(pages::not_found)
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Server-rendered pages, the contact endpoint and crawler files
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about/", get(pages::about))
        .route("/privacy/", get(pages::privacy))
        .route("/services/catalog/", get(pages::catalog))
        .route("/services/catalog/:slug/", get(pages::service_detail))
        .route("/portfolio/", get(pages::portfolio))
        .route("/contacts/send/", post(contact::send))
        .route("/robots.txt", get(seo::robots_txt))
        .route("/sitemap.xml", get(seo::sitemap_xml))
}

/// Admin JSON API
fn admin_routes(config: &AppConfig) -> Router<AppState> {
    let upload_limit = config.storage.max_file_size_bytes() + MULTIPART_OVERHEAD;

    Router::new()
        .merge(auth_routes())
        .merge(content_routes())
        .merge(catalog_routes())
        .merge(contact_routes())
        .route("/telegram-chats", get(telegram::list_chats))
        .route(
            "/telegram-chats/:id",
            patch(telegram::update_chat).delete(telegram::delete_chat),
        )
        .route(
            "/uploads/:entity",
            post(uploads::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .fallback(admin::not_found)
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/me", get(auth::me))
}

/// Settings, slides, about blocks, testimonials and statistics
fn content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(content::list_settings).post(content::create_settings),
        )
        .route(
            "/settings/:id",
            get(content::get_settings)
                .put(content::update_settings)
                .delete(content::delete_settings),
        )
        .route("/slides", get(content::list_slides).post(content::create_slide))
        .route(
            "/slides/:id",
            get(content::get_slide)
                .put(content::update_slide)
                .delete(content::delete_slide),
        )
        .route("/about", get(content::list_about).post(content::create_about))
        .route(
            "/about/:id",
            get(content::get_about)
                .put(content::update_about)
                .delete(content::delete_about),
        )
        .route(
            "/testimonials",
            get(content::list_testimonials).post(content::create_testimonial),
        )
        .route(
            "/testimonials/:id",
            get(content::get_testimonial)
                .put(content::update_testimonial)
                .delete(content::delete_testimonial),
        )
        .route(
            "/statistics",
            get(content::list_statistics).post(content::create_statistic),
        )
        .route(
            "/statistics/:id",
            get(content::get_statistic)
                .put(content::update_statistic)
                .delete(content::delete_statistic),
        )
}

/// Categories, services and portfolio
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/categories/:id",
            get(catalog::get_category)
                .put(catalog::update_category)
                .delete(catalog::delete_category),
        )
        .route(
            "/services",
            get(catalog::list_services).post(catalog::create_service),
        )
        .route(
            "/services/:id",
            get(catalog::get_service)
                .put(catalog::update_service)
                .delete(catalog::delete_service),
        )
        .route(
            "/portfolio",
            get(catalog::list_portfolio).post(catalog::create_portfolio_item),
        )
        .route(
            "/portfolio/:id",
            get(catalog::get_portfolio_item)
                .put(catalog::update_portfolio_item)
                .delete(catalog::delete_portfolio_item),
        )
}

/// Contact inbox
fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(contacts::list_contacts))
        .route("/contacts/bulk", post(contacts::bulk_contacts))
        .route("/contacts/unread-count", get(contacts::unread_count))
        .route(
            "/contacts/:id",
            get(contacts::get_contact)
                .patch(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
}
