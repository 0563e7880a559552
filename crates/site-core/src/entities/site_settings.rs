//! Site-wide settings - one active row drives the public pages

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::format_phone_or_raw;

pub const DEFAULT_SITE_NAME: &str = "Яркий Город";
pub const DEFAULT_WORKING_HOURS: &str = "Мы открыты с 10:00 до 19:00";

/// Contact details and social links shown in the header and footer
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub id: Uuid,
    pub site_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub working_hours: String,
    pub vk_link: Option<String>,
    pub instagram_link: Option<String>,
    pub telegram_link: Option<String>,
    /// Bot credential used when the environment does not provide one
    pub telegram_bot_token: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteSettings {
    pub fn new(phone: String, email: String, address: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            phone,
            email,
            address,
            working_hours: DEFAULT_WORKING_HOURS.to_string(),
            vk_link: None,
            instagram_link: None,
            telegram_link: None,
            telegram_bot_token: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Phone in the `+7 (XXXX) XX-XX-XX` display mask, or as entered when
    /// it has fewer than eleven digits
    pub fn phone_formatted(&self) -> String {
        format_phone_or_raw(&self.phone)
    }

    /// Digits with a leading `+`, for `tel:` links
    pub fn phone_href(&self) -> String {
        format!("+{}", crate::value_objects::phone_digits(&self.phone))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
