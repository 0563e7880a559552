//! # site-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `site-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use site_db::{connect, run_migrations, PgServiceRepository, PoolSettings};
//! use site_core::ServiceRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = connect(&PoolSettings::new("postgres://localhost/bright_city", 10, 1)).await?;
//!     run_migrations(&pool, None).await?;
//!
//!     let services = PgServiceRepository::new(pool);
//!     let home = services.list_active(Some(8)).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{connect, run_migrations, MigrateError, PgPool, PoolSettings};
pub use repositories::{
    PgAboutRepository, PgAdminUserRepository, PgCategoryRepository, PgContactMessageRepository,
    PgPortfolioRepository, PgServiceRepository, PgSiteSettingsRepository, PgSlideRepository,
    PgStatisticRepository, PgTelegramChatRepository, PgTestimonialRepository,
};
