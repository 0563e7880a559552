//! Page content models: settings, slides, about block, testimonials, statistics

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for site_settings table
#[derive(Debug, Clone, FromRow)]
pub struct SiteSettingsModel {
    pub id: Uuid,
    pub site_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub working_hours: String,
    pub vk_link: Option<String>,
    pub instagram_link: Option<String>,
    pub telegram_link: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for slides table
#[derive(Debug, Clone, FromRow)]
pub struct SlideModel {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    pub button_text: String,
    pub button_link: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for about_us table
#[derive(Debug, Clone, FromRow)]
pub struct AboutModel {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub subtitle_margin_bottom: f64,
    pub paragraph_margin_bottom: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for testimonials table
#[derive(Debug, Clone, FromRow)]
pub struct TestimonialModel {
    pub id: Uuid,
    pub name: String,
    pub position: Option<String>,
    pub avatar: Option<String>,
    pub rating: i16,
    pub text: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for statistics table
#[derive(Debug, Clone, FromRow)]
pub struct StatisticModel {
    pub id: Uuid,
    pub icon_class: String,
    pub number: i32,
    pub suffix: String,
    pub label: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
