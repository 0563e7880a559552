//! Hero slider entry on the home page

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_BUTTON_TEXT: &str = "Наши услуги";
pub const DEFAULT_BUTTON_LINK: &str = "#services";

/// Maximum display order accepted from the admin
pub const MAX_ORDER: i32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    pub button_text: String,
    pub button_link: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Slide {
    pub fn new(title: String, image: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            subtitle: None,
            image,
            button_text: DEFAULT_BUTTON_TEXT.to_string(),
            button_link: DEFAULT_BUTTON_LINK.to_string(),
            order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
