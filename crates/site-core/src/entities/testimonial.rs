//! Client testimonial

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    /// Position or company
    pub position: Option<String>,
    pub avatar: Option<String>,
    pub rating: i16,
    pub text: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Testimonial {
    pub fn new(name: String, text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            position: None,
            avatar: None,
            rating: MAX_RATING,
            text,
            order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rating clamped to 1..=5 for star rendering
    pub fn stars(&self) -> usize {
        self.rating.clamp(MIN_RATING, MAX_RATING) as usize
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
