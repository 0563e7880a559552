//! Business logic services
//!
//! Page assembly for the public site, contact intake, and the use cases
//! behind the admin API.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod contact;
pub mod context;
pub mod error;
pub mod media;
pub mod pages;
pub mod portfolio;
pub mod seed;
pub mod sitemap;

pub use admin::AdminService;
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use contact::{ContactService, ContactSubmission};
pub use context::{Repositories, ServiceContext, ServiceContextBuilder};
pub use error::{FieldErrors, ServiceError, ServiceResult};
pub use media::{media_url, MediaStorage, StoredFile};
pub use pages::PageService;
pub use portfolio::PortfolioService;
pub use seed::{SeedReport, SeedService};
pub use sitemap::SitemapService;
