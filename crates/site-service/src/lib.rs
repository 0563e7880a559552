//! # site-service
//!
//! Application layer: page contexts for the public site, contact intake,
//! admin use cases, authentication and demo data.
//!
//! Services borrow a [`ServiceContext`] that owns the repositories, the
//! notifier and the auth helpers:
//!
//! ```ignore
//! let ctx = ServiceContextBuilder::new()
//!     .repositories(repos)
//!     .notifier(Arc::new(notifier))
//!     .jwt_service(Arc::new(jwt))
//!     .build()?;
//!
//! let home = PageService::new(&ctx).home().await;
//! ```

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use services::{
    AdminService, AuthService, CatalogService, ContactService, ContactSubmission, MediaStorage,
    PageService, PortfolioService, Repositories, SeedReport, SeedService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SitemapService, StoredFile,
};
