//! Services catalog - categories and the services offered

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

pub const DEFAULT_PRICE_UNIT: &str = "₽";

/// Grouping used to filter the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceCategory {
    pub fn new(name: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
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

/// A service of the agency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category_id: Option<Uuid>,
    pub icon: Option<String>,
    pub image: Option<String>,
    /// Rich HTML body
    pub description: String,
    /// `NUMERIC(10, 2)`
    pub price_from: Option<Decimal>,
    pub price_unit: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn new(name: String, slug: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
            category_id: None,
            icon: None,
            image: None,
            description,
            price_from: None,
            price_unit: DEFAULT_PRICE_UNIT.to_string(),
            order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Public detail page
    pub fn url(&self) -> String {
        format!("/services/catalog/{}/", self.slug)
    }

    /// Price with exactly two decimals, `1500.00`
    pub fn price_text(&self) -> Option<String> {
        self.price_from.map(|mut price| {
            price.rescale(2);
            price.to_string()
        })
    }

    /// "от 1500.00 ₽" style label, if a price is set
    pub fn price_label(&self) -> Option<String> {
        self.price_text()
            .map(|price| format!("от {price} {}", self.price_unit).trim_end().to_string())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_url_and_price() {
        let mut service = Service::new(
            "Объемные буквы".to_string(),
            "obemnye-bukvy".to_string(),
            String::new(),
        );
        assert_eq!(service.url(), "/services/catalog/obemnye-bukvy/");
        assert!(service.price_label().is_none());

        service.price_from = Some(Decimal::new(1500, 0));
        assert_eq!(service.price_text().unwrap(), "1500.00");
        assert_eq!(service.price_label().unwrap(), "от 1500.00 ₽");

        service.price_unit = String::new();
        assert_eq!(service.price_label().unwrap(), "от 1500.00");
    }
}
