//! Request DTOs for forms and the admin API
//!
//! All request DTOs implement `Deserialize`; those carrying user input also
//! implement `Validate`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use site_core::ContactStatus;
use uuid::Uuid;
use validator::Validate;

/// Page size of the public catalog and portfolio
pub const PUBLIC_PAGE_SIZE: u32 = 12;

/// Default page size of admin listings
pub const ADMIN_PAGE_SIZE: u32 = 25;

fn default_true() -> bool {
    true
}

/// Treat `""` and whitespace as absent, so optional form fields skip validation
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

/// Lenient page number: anything unparsable or zero is page 1
pub fn page_number(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}

// ============================================================================
// Public pages
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogParams {
    pub page: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioParams {
    pub page: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
}

/// Contact form, posted urlencoded from the page or the callback modal
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Укажите имя (до 100 символов)"))]
    pub name: String,

    /// Only presence is checked here; `Phone::parse` owns the digit rule
    #[serde(default)]
    #[validate(length(min = 1, message = "Укажите телефон"))]
    pub phone: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(email(message = "Введите корректный адрес электронной почты"))]
    pub email: Option<String>,

    #[serde(default)]
    pub message: String,

    /// Checkbox; any non-empty value is consent
    #[serde(default, deserialize_with = "empty_as_none")]
    pub privacy_policy: Option<String>,

    /// Service the visitor came from, prepended to the message
    #[serde(default, deserialize_with = "empty_as_none")]
    pub service_context: Option<String>,

    #[serde(default)]
    pub is_callback: Option<String>,
}

impl ContactForm {
    pub fn has_consent(&self) -> bool {
        self.privacy_policy.is_some()
    }

    pub fn is_callback(&self) -> bool {
        self.is_callback.as_deref() == Some("true")
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters"))]
    pub username: String,

    pub password: String,
}

// ============================================================================
// Admin listing
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<ContactStatus>,
    pub is_read: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
}

/// Page and size shared by the admin listings
pub trait Paging {
    fn page(&self) -> Option<u32>;
    fn per_page(&self) -> Option<u32>;

    /// `(page, per_page)` with defaults applied and the size capped at 100
    fn paging(&self) -> (u32, u32) {
        let page = self.page().filter(|p| *p > 0).unwrap_or(1);
        let per_page = self.per_page().unwrap_or(ADMIN_PAGE_SIZE).clamp(1, 100);
        (page, per_page)
    }
}

impl Paging for ListParams {
    fn page(&self) -> Option<u32> {
        self.page
    }
    fn per_page(&self) -> Option<u32> {
        self.per_page
    }
}

impl Paging for ContactListParams {
    fn page(&self) -> Option<u32> {
        self.page
    }
    fn per_page(&self) -> Option<u32> {
        self.per_page
    }
}

// ============================================================================
// Admin content inputs (create and full update)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SiteSettingsInput {
    #[validate(length(min = 1, max = 200))]
    pub site_name: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub phone: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 300))]
    pub address: String,

    #[validate(length(max = 200))]
    pub working_hours: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub vk_link: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub instagram_link: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub telegram_link: Option<String>,

    /// Absent keeps the stored token; `""` clears it
    #[validate(length(max = 200))]
    pub telegram_bot_token: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SlideInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 300))]
    pub subtitle: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub image: String,

    #[validate(length(min = 1, max = 50))]
    pub button_text: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub button_link: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AboutInput {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 300))]
    pub subtitle: Option<String>,

    #[validate(length(min = 1))]
    pub description: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,

    #[validate(range(min = 0.0, max = 10.0))]
    pub subtitle_margin_bottom: Option<f64>,

    #[validate(range(min = 0.0, max = 10.0))]
    pub paragraph_margin_bottom: Option<f64>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Derived from the name when absent
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 100))]
    pub slug: Option<String>,

    #[serde(default)]
    pub order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 100))]
    pub slug: Option<String>,

    pub category_id: Option<Uuid>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub icon: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Decimal string, `"1500"` or `"1500.50"`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub price_from: Option<String>,

    #[validate(length(max = 20))]
    pub price_unit: Option<String>,

    #[serde(default)]
    pub order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PortfolioItemInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub service_id: Option<Uuid>,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 200))]
    pub client: Option<String>,

    pub date_completed: Option<NaiveDate>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TestimonialInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 200))]
    pub position: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub avatar: Option<String>,

    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i16>,

    #[validate(length(min = 1))]
    pub text: String,

    #[serde(default)]
    pub order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StatisticInput {
    #[validate(length(min = 1, max = 50))]
    pub icon_class: Option<String>,

    #[validate(range(min = 0))]
    pub number: i32,

    #[serde(default)]
    #[validate(length(max = 10))]
    pub suffix: String,

    #[validate(length(min = 1, max = 100))]
    pub label: String,

    #[serde(default)]
    pub order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Operator edit of a lead; any edit marks it read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactUpdateInput {
    pub status: Option<ContactStatus>,
    pub is_read: Option<bool>,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    MarkRead,
    MarkInProgress,
    MarkCompleted,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactBulkRequest {
    pub ids: Vec<Uuid>,
    pub action: BulkAction,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TelegramChatUpdate {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_form_from_urlencoded_fields() {
        let form: ContactForm = serde_json::from_value(serde_json::json!({
            "name": "Иван",
            "phone": "+7 (914) 123-45-67",
            "email": "",
            "message": "Нужна вывеска",
            "privacy_policy": "on",
            "is_callback": "true"
        }))
        .unwrap();
        assert!(form.email.is_none());
        assert!(form.has_consent());
        assert!(form.is_callback());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_contact_form_without_consent() {
        let form: ContactForm = serde_json::from_value(serde_json::json!({
            "name": "Иван",
            "phone": "89141234567",
            "privacy_policy": ""
        }))
        .unwrap();
        assert!(!form.has_consent());
        assert!(!form.is_callback());
    }

    #[test]
    fn test_contact_form_invalid_email() {
        let form = ContactForm {
            name: "Иван".to_string(),
            phone: "89141234567".to_string(),
            email: Some("not-an-email".to_string()),
            ..ContactForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_page_number_is_lenient() {
        assert_eq!(page_number(None), 1);
        assert_eq!(page_number(Some("3")), 3);
        assert_eq!(page_number(Some("0")), 1);
        assert_eq!(page_number(Some("last")), 1);
    }

    #[test]
    fn test_paging_caps_size() {
        let params = ListParams {
            page: Some(0),
            per_page: Some(1000),
            ..ListParams::default()
        };
        assert_eq!(params.paging(), (1, 100));
        assert_eq!(ListParams::default().paging(), (1, ADMIN_PAGE_SIZE));
    }

    #[test]
    fn test_bulk_action_names() {
        let req: ContactBulkRequest = serde_json::from_value(serde_json::json!({
            "ids": [],
            "action": "mark_in_progress"
        }))
        .unwrap();
        assert_eq!(req.action, BulkAction::MarkInProgress);
    }
}
