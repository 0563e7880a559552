//! Database models - SQLx-compatible structs for PostgreSQL tables

mod admin_user;
mod contact_message;
mod content;
mod service;
mod telegram_chat;

pub use admin_user::AdminUserModel;
pub use contact_message::ContactMessageModel;
pub use content::{AboutModel, SiteSettingsModel, SlideModel, StatisticModel, TestimonialModel};
pub use service::{CategoryModel, PortfolioItemModel, ServiceModel};
pub use telegram_chat::TelegramChatModel;

/// Row count from `SELECT COUNT(*)`
pub type CountRow = (i64,);
