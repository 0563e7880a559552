//! Response DTOs for pages and the admin API
//!
//! One struct per entity, shared by templates and JSON. Derived display
//! values (formatted phone, price label, media URLs) are computed here so
//! templates stay free of logic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Page-number pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl PageMeta {
    pub fn new(page: u32, per_page: u32, total: i64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = u32::try_from((total.max(0) + i64::from(per_page) - 1) / i64::from(per_page))
            .unwrap_or(u32::MAX)
            .max(1);
        let has_prev = page > 1;
        let has_next = page < total_pages;
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_prev,
            has_next,
            prev_page: has_prev.then(|| page - 1),
            next_page: has_next.then(|| page + 1),
        }
    }
}

/// Paginated list
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: PageMeta) -> Self {
        Self { data, pagination }
    }
}

/// Count of rows a bulk action touched
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BulkResult {
    pub updated: u64,
}

// ============================================================================
// Content
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SiteSettingsResponse {
    pub id: String,
    pub site_name: String,
    pub phone: String,
    pub phone_formatted: String,
    pub phone_href: String,
    pub email: String,
    pub address: String,
    pub working_hours: String,
    pub vk_link: Option<String>,
    pub instagram_link: Option<String>,
    pub telegram_link: Option<String>,
    /// The token itself is never echoed back
    pub telegram_bot_token_set: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlideResponse {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    pub image_url: String,
    pub button_text: String,
    pub button_link: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutResponse {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub subtitle_margin_bottom: f64,
    pub paragraph_margin_bottom: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub url: String,
    pub category_id: Option<String>,
    pub icon: Option<String>,
    pub icon_url: Option<String>,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub description: String,
    /// Two decimals with a dot, e.g. `"1500.00"`
    pub price_from: Option<String>,
    pub price_unit: String,
    pub price_label: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioItemResponse {
    pub id: String,
    pub title: String,
    pub service_id: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub client: Option<String>,
    pub date_completed: Option<NaiveDate>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestimonialResponse {
    pub id: String,
    pub name: String,
    pub position: Option<String>,
    pub avatar: Option<String>,
    pub avatar_url: Option<String>,
    pub rating: i16,
    /// One entry per filled star, for `{{#each}}`
    pub stars: Vec<u8>,
    pub text: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticResponse {
    pub id: String,
    pub icon_class: String,
    pub number: i32,
    pub suffix: String,
    pub display: String,
    pub label: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TelegramChatResponse {
    pub id: String,
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessageResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: String,
    pub status: String,
    pub status_label: String,
    pub is_read: bool,
    pub admin_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    pub id: String,
    pub username: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AdminUserResponse>,
}

// ============================================================================
// Page contexts
// ============================================================================

/// What every public page receives
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub site_name: String,
    pub settings: Option<SiteSettingsResponse>,
    pub phone_formatted: String,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub site: SiteContext,
    pub slides: Vec<SlideResponse>,
    pub services: Vec<ServiceResponse>,
    pub about: Option<AboutResponse>,
    pub featured_works: Vec<PortfolioItemResponse>,
    pub statistics: Vec<StatisticResponse>,
}

#[derive(Debug, Serialize)]
pub struct AboutPage {
    pub site: SiteContext,
    pub about: Option<AboutResponse>,
    pub testimonials: Vec<TestimonialResponse>,
}

#[derive(Debug, Serialize)]
pub struct PrivacyPage {
    pub site: SiteContext,
}

#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub site: SiteContext,
    pub services: Vec<ServiceResponse>,
    pub search_query: String,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct ServiceDetailPage {
    pub site: SiteContext,
    pub service: ServiceResponse,
    pub portfolio_items: Vec<PortfolioItemResponse>,
    pub related_services: Vec<ServiceResponse>,
}

/// Works of one service, shown when the portfolio is not filtered
#[derive(Debug, Serialize)]
pub struct PortfolioAlbum {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub works: Vec<PortfolioItemResponse>,
    pub count: i64,
    pub service: ServiceResponse,
}

#[derive(Debug, Serialize)]
pub struct PortfolioPage {
    pub site: SiteContext,
    pub portfolio_items: Vec<PortfolioItemResponse>,
    pub services: Vec<ServiceResponse>,
    pub search_query: String,
    pub current_service: Option<ServiceResponse>,
    pub portfolio_albums: Vec<PortfolioAlbum>,
    pub pagination: PageMeta,
}

/// Successful contact submission
#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub id: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_meta() {
        let meta = PageMeta::new(2, 12, 30);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.prev_page, Some(1));
        assert_eq!(meta.next_page, Some(3));

        let empty = PageMeta::new(1, 12, 0);
        assert_eq!(empty.total_pages, 1);
        assert!(!empty.has_prev);
        assert!(!empty.has_next);

        let exact = PageMeta::new(1, 12, 12);
        assert_eq!(exact.total_pages, 1);
    }
}
