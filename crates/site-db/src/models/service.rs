//! Catalog models: categories, services, portfolio items

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for service_categories table
#[derive(Debug, Clone, FromRow)]
pub struct CategoryModel {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for services table
#[derive(Debug, Clone, FromRow)]
pub struct ServiceModel {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category_id: Option<Uuid>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub description: String,
    pub price_from: Option<Decimal>,
    pub price_unit: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for portfolio_items table
#[derive(Debug, Clone, FromRow)]
pub struct PortfolioItemModel {
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
