//! Counter shown in the statistics strip ("1500+ projects")

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_ICON_CLASS: &str = "bi-check-circle-fill";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistic {
    pub id: Uuid,
    /// Bootstrap Icons class name
    pub icon_class: String,
    pub number: i32,
    pub suffix: String,
    pub label: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Statistic {
    pub fn new(number: i32, suffix: String, label: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            icon_class: DEFAULT_ICON_CLASS.to_string(),
            number,
            suffix,
            label,
            order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// "1500+"
    pub fn display(&self) -> String {
        format!("{}{}", self.number, self.suffix)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
