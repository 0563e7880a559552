//! Portfolio work

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioItem {
    pub id: Uuid,
    pub title: String,
    pub service_id: Option<Uuid>,
    pub description: String,
    pub image: Option<String>,
    pub client: Option<String>,
    pub date_completed: Option<NaiveDate>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PortfolioItem {
    pub fn new(title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            service_id: None,
            description,
            image: None,
            client: None,
            date_completed: None,
            is_featured: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
