//! Repository traits (ports) - define the interface for data access
//!
//! Public read paths only ever see active rows; the `list` methods used by
//! the admin surface see everything and filter on request.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    AboutUs, AdminUser, ContactMessage, PortfolioItem, Service, ServiceCategory, SiteSettings,
    Slide, Statistic, TelegramChat, Testimonial,
};
use crate::error::DomainError;
use crate::value_objects::ContactStatus;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Admin listing filter
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

/// One page of results with the unpaginated total
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Site Settings Repository
// ============================================================================

#[async_trait]
pub trait SiteSettingsRepository: Send + Sync {
    /// The single active row, if any
    async fn find_active(&self) -> RepoResult<Option<SiteSettings>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<SiteSettings>>;

    async fn list(&self) -> RepoResult<Vec<SiteSettings>>;

    /// Insert; an active row deactivates all others in the same transaction
    async fn create(&self, settings: &SiteSettings) -> RepoResult<()>;

    /// Update; an active row deactivates all others in the same transaction
    async fn update(&self, settings: &SiteSettings) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Slide Repository
// ============================================================================

#[async_trait]
pub trait SlideRepository: Send + Sync {
    /// Active slides by `order`, newest first within the same order
    async fn list_active(&self, limit: i64) -> RepoResult<Vec<Slide>>;

    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Slide>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Slide>>;

    async fn create(&self, slide: &Slide) -> RepoResult<()>;

    async fn update(&self, slide: &Slide) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// About Repository
// ============================================================================

#[async_trait]
pub trait AboutRepository: Send + Sync {
    async fn find_active(&self) -> RepoResult<Option<AboutUs>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AboutUs>>;

    async fn list(&self) -> RepoResult<Vec<AboutUs>>;

    /// Insert; an active row deactivates all others in the same transaction
    async fn create(&self, about: &AboutUs) -> RepoResult<()>;

    /// Update; an active row deactivates all others in the same transaction
    async fn update(&self, about: &AboutUs) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Service Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_active(&self) -> RepoResult<Vec<ServiceCategory>>;

    async fn list(&self, query: &ListQuery) -> RepoResult<Page<ServiceCategory>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ServiceCategory>>;

    /// Whether a slug is used by a row other than `exclude`
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> RepoResult<bool>;

    async fn create(&self, category: &ServiceCategory) -> RepoResult<()>;

    async fn update(&self, category: &ServiceCategory) -> RepoResult<()>;

    /// Delete; services of the category keep existing without one
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Service Repository
// ============================================================================

/// Catalog search
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive match on name or description
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Active services by `order, name`
    async fn list_active(&self, limit: Option<i64>) -> RepoResult<Vec<Service>>;

    /// Active services by name, for filter bars
    async fn list_active_by_name(&self) -> RepoResult<Vec<Service>>;

    async fn search_active(&self, query: &CatalogQuery) -> RepoResult<Page<Service>>;

    async fn find_active_by_slug(&self, slug: &str) -> RepoResult<Option<Service>>;

    /// Other active services, same category first
    async fn find_related(&self, service: &Service, limit: i64) -> RepoResult<Vec<Service>>;

    /// Active services that have at least one active portfolio item
    async fn list_with_active_works(&self) -> RepoResult<Vec<Service>>;

    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Service>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Service>>;

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Service>>;

    /// Whether a slug is used by a row other than `exclude`
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> RepoResult<bool>;

    async fn create(&self, service: &Service) -> RepoResult<()>;

    async fn update(&self, service: &Service) -> RepoResult<()>;

    /// Delete; portfolio items keep existing without a service
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Portfolio Repository
// ============================================================================

/// Public portfolio listing filter
#[derive(Debug, Clone, Default)]
pub struct PortfolioQuery {
    pub service_slug: Option<String>,
    /// Case-insensitive match on title, description or client
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn list_featured(&self, limit: i64) -> RepoResult<Vec<PortfolioItem>>;

    async fn search_active(&self, query: &PortfolioQuery) -> RepoResult<Page<PortfolioItem>>;

    async fn list_active_by_service(
        &self,
        service_id: Uuid,
        limit: i64,
    ) -> RepoResult<Vec<PortfolioItem>>;

    async fn count_active_by_service(&self, service_id: Uuid) -> RepoResult<i64>;

    /// Every active item, for the sitemap
    async fn list_all_active(&self) -> RepoResult<Vec<PortfolioItem>>;

    async fn list(&self, query: &ListQuery) -> RepoResult<Page<PortfolioItem>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<PortfolioItem>>;

    async fn find_by_title(&self, title: &str) -> RepoResult<Option<PortfolioItem>>;

    async fn create(&self, item: &PortfolioItem) -> RepoResult<()>;

    async fn update(&self, item: &PortfolioItem) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Testimonial Repository
// ============================================================================

#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn list_active(&self, limit: i64) -> RepoResult<Vec<Testimonial>>;

    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Testimonial>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Testimonial>>;

    async fn create(&self, testimonial: &Testimonial) -> RepoResult<()>;

    async fn update(&self, testimonial: &Testimonial) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Statistic Repository
// ============================================================================

#[async_trait]
pub trait StatisticRepository: Send + Sync {
    async fn list_active(&self) -> RepoResult<Vec<Statistic>>;

    async fn list(&self) -> RepoResult<Vec<Statistic>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Statistic>>;

    async fn find_by_label(&self, label: &str) -> RepoResult<Option<Statistic>>;

    async fn create(&self, statistic: &Statistic) -> RepoResult<()>;

    async fn update(&self, statistic: &Statistic) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Telegram Chat Repository
// ============================================================================

#[async_trait]
pub trait TelegramChatRepository: Send + Sync {
    /// Recipients of outbound notifications
    async fn list_active(&self) -> RepoResult<Vec<TelegramChat>>;

    async fn list(&self) -> RepoResult<Vec<TelegramChat>>;

    /// Insert an unseen chat, or refresh names and reactivate a known one
    async fn upsert(
        &self,
        chat_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> RepoResult<TelegramChat>;

    async fn set_active(&self, id: Uuid, is_active: bool) -> RepoResult<bool>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Contact Message Repository
// ============================================================================

/// Admin inbox filter
#[derive(Debug, Clone, Default)]
pub struct ContactQuery {
    pub status: Option<ContactStatus>,
    pub is_read: Option<bool>,
    /// Case-insensitive match on name, phone, email or message
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn create(&self, message: &ContactMessage) -> RepoResult<()>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ContactMessage>>;

    async fn list(&self, query: &ContactQuery) -> RepoResult<Page<ContactMessage>>;

    async fn count_unread(&self) -> RepoResult<i64>;

    async fn update(&self, message: &ContactMessage) -> RepoResult<()>;

    /// Bulk "mark as read"; returns affected rows
    async fn mark_read(&self, ids: &[Uuid]) -> RepoResult<u64>;

    /// Bulk status change, which also marks the rows read
    async fn set_status(&self, ids: &[Uuid], status: ContactStatus) -> RepoResult<u64>;

    async fn delete(&self, id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Admin User Repository
// ============================================================================

#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AdminUser>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>>;

    async fn create(&self, user: &AdminUser, password_hash: &str) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()>;

    async fn record_login(&self, id: Uuid) -> RepoResult<()>;
}
