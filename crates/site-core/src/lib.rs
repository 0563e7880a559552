//! # site-core
//!
//! Domain layer containing content entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AboutUs, AdminUser, ContactMessage, ContactNotice, PortfolioItem, Service, ServiceCategory,
    SiteSettings, Slide, Statistic, TelegramChat, Testimonial,
};
pub use error::DomainError;
pub use traits::{
    AboutRepository, AdminUserRepository, CatalogQuery, CategoryRepository,
    ContactMessageRepository, ContactQuery, DeliveryReport, ListQuery, NoopNotifier, Notifier,
    Page, PortfolioQuery, PortfolioRepository, RepoResult, ServiceRepository,
    SiteSettingsRepository, SlideRepository, StatisticRepository, TelegramChatRepository,
    TestimonialRepository,
};
pub use value_objects::{
    format_phone, format_phone_or_raw, phone_digits, slugify, with_suffix, ContactStatus, Phone,
    PhoneError,
};
