//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in site-core.
//! Each repository handles database operations for a specific domain entity.

mod about;
mod admin_user;
mod category;
mod contact_message;
mod error;
mod portfolio;
mod service;
mod site_settings;
mod slide;
mod sql;
mod statistic;
mod telegram_chat;
mod testimonial;

pub use about::PgAboutRepository;
pub use admin_user::PgAdminUserRepository;
pub use category::PgCategoryRepository;
pub use contact_message::PgContactMessageRepository;
pub use portfolio::PgPortfolioRepository;
pub use service::PgServiceRepository;
pub use site_settings::PgSiteSettingsRepository;
pub use slide::PgSlideRepository;
pub use statistic::PgStatisticRepository;
pub use telegram_chat::PgTelegramChatRepository;
pub use testimonial::PgTestimonialRepository;
