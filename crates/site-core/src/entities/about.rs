//! "About us" block

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "О нас";
pub const DEFAULT_SUBTITLE_MARGIN: f64 = 1.0;
pub const DEFAULT_PARAGRAPH_MARGIN: f64 = 0.75;

/// Upper bound for the spacing values, in rem
pub const MAX_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AboutUs {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    /// Rich HTML body
    pub description: String,
    pub image: Option<String>,
    /// Space under the subtitle, rem
    pub subtitle_margin_bottom: f64,
    /// Space between paragraphs, rem
    pub paragraph_margin_bottom: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AboutUs {
    pub fn new(description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: None,
            description,
            image: None,
            subtitle_margin_bottom: DEFAULT_SUBTITLE_MARGIN,
            paragraph_margin_bottom: DEFAULT_PARAGRAPH_MARGIN,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether a spacing value is within the range the admin allows
    pub fn margin_in_range(value: f64) -> bool {
        (0.0..=MAX_MARGIN).contains(&value)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spacing() {
        let about = AboutUs::new("<p>Привет</p>".to_string());
        assert_eq!(about.title, "О нас");
        assert!((about.subtitle_margin_bottom - 1.0).abs() < f64::EPSILON);
        assert!((about.paragraph_margin_bottom - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_margin_range() {
        assert!(AboutUs::margin_in_range(0.0));
        assert!(AboutUs::margin_in_range(10.0));
        assert!(!AboutUs::margin_in_range(-0.5));
        assert!(!AboutUs::margin_in_range(10.5));
    }
}
