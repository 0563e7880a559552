//! Domain entities - content managed through the admin surface

pub mod about;
pub mod admin_user;
pub mod contact_message;
pub mod portfolio;
pub mod service;
pub mod site_settings;
pub mod slide;
pub mod statistic;
pub mod telegram_chat;
pub mod testimonial;

pub use about::AboutUs;
pub use admin_user::AdminUser;
pub use contact_message::{ContactMessage, ContactNotice};
pub use portfolio::PortfolioItem;
pub use service::{Service, ServiceCategory};
pub use site_settings::SiteSettings;
pub use slide::Slide;
pub use statistic::Statistic;
pub use telegram_chat::TelegramChat;
pub use testimonial::Testimonial;
