//! In-memory repositories and a recording notifier for tests
//!
//! Enabled for this crate's unit tests and, through the `testing` feature,
//! for router tests in dependent crates.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use site_common::JwtService;
use site_core::{
    AboutRepository, AboutUs, AdminUser, AdminUserRepository, CatalogQuery, CategoryRepository,
    ContactMessage, ContactMessageRepository, ContactNotice, ContactQuery, ContactStatus,
    DeliveryReport, DomainError, ListQuery, Notifier, Page, PortfolioItem, PortfolioQuery,
    PortfolioRepository, RepoResult, Service, ServiceCategory, ServiceRepository, SiteSettings,
    SiteSettingsRepository, Slide, SlideRepository, Statistic, StatisticRepository, TelegramChat,
    TelegramChatRepository, Testimonial, TestimonialRepository,
};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::services::{Repositories, ServiceContext, ServiceContextBuilder};

/// JWT secret used by [`memory_context`]
pub const TEST_JWT_SECRET: &str = "test-secret-key-that-is-long-enough";

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn window<T: Clone>(items: &[T], limit: i64, offset: i64) -> Vec<T> {
    let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
    items.iter().skip(offset).take(limit).cloned().collect()
}

fn page_of<T: Clone>(items: &[T], limit: i64, offset: i64) -> Page<T> {
    Page {
        items: window(items, limit, offset),
        total: items.len() as i64,
    }
}

/// Replace-by-id, reporting a miss as `NotFound`
fn replace<T: Clone>(rows: &mut [T], id_of: impl Fn(&T) -> Uuid, row: &T, entity: &'static str) -> RepoResult<()> {
    let id = id_of(row);
    let slot = rows
        .iter_mut()
        .find(|r| id_of(r) == id)
        .ok_or_else(|| DomainError::not_found(entity, id))?;
    *slot = row.clone();
    Ok(())
}

fn remove<T>(rows: &mut Vec<T>, id_of: impl Fn(&T) -> Uuid, id: Uuid) -> bool {
    let before = rows.len();
    rows.retain(|r| id_of(r) != id);
    rows.len() != before
}

// ============================================================================
// Content repositories
// ============================================================================

#[derive(Default)]
pub struct MemorySettings(pub Mutex<Vec<SiteSettings>>);

impl MemorySettings {
    fn save(&self, settings: &SiteSettings, insert: bool) -> RepoResult<()> {
        let mut rows = self.0.lock();
        if insert {
            rows.push(settings.clone());
        } else {
            replace(&mut rows, |s| s.id, settings, "SiteSettings")?;
        }
        if settings.is_active {
            for row in rows.iter_mut().filter(|r| r.id != settings.id) {
                row.is_active = false;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SiteSettingsRepository for MemorySettings {
    async fn find_active(&self) -> RepoResult<Option<SiteSettings>> {
        Ok(self.0.lock().iter().find(|s| s.is_active).cloned())
    }
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<SiteSettings>> {
        Ok(self.0.lock().iter().find(|s| s.id == id).cloned())
    }
    async fn list(&self) -> RepoResult<Vec<SiteSettings>> {
        Ok(self.0.lock().clone())
    }
    async fn create(&self, settings: &SiteSettings) -> RepoResult<()> {
        self.save(settings, true)
    }
    async fn update(&self, settings: &SiteSettings) -> RepoResult<()> {
        self.save(settings, false)
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove(&mut self.0.lock(), |s| s.id, id))
    }
}

#[derive(Default)]
pub struct MemorySlides(pub Mutex<Vec<Slide>>);

impl MemorySlides {
    fn sorted(&self) -> Vec<Slide> {
        let mut rows = self.0.lock().clone();
        rows.sort_by(|a, b| a.order.cmp(&b.order).then(b.created_at.cmp(&a.created_at)));
        rows
    }
}

#[async_trait]
impl SlideRepository for MemorySlides {
    async fn list_active(&self, limit: i64) -> RepoResult<Vec<Slide>> {
        let rows: Vec<Slide> = self.sorted().into_iter().filter(|s| s.is_active).collect();
        Ok(window(&rows, limit, 0))
    }
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Slide>> {
        let rows: Vec<Slide> = self
            .sorted()
            .into_iter()
            .filter(|s| query.is_active.is_none_or(|a| s.is_active == a))
            .filter(|s| query.search.as_deref().is_none_or(|q| contains(&s.title, q)))
            .collect();
        Ok(page_of(&rows, query.limit, query.offset))
    }
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Slide>> {
        Ok(self.0.lock().iter().find(|s| s.id == id).cloned())
    }
    async fn create(&self, slide: &Slide) -> RepoResult<()> {
        self.0.lock().push(slide.clone());
        Ok(())
    }
    async fn update(&self, slide: &Slide) -> RepoResult<()> {
        replace(&mut self.0.lock(), |s| s.id, slide, "Slide")
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove(&mut self.0.lock(), |s| s.id, id))
    }
}

#[derive(Default)]
pub struct MemoryAbout(pub Mutex<Vec<AboutUs>>);

impl MemoryAbout {
    fn save(&self, about: &AboutUs, insert: bool) -> RepoResult<()> {
        let mut rows = self.0.lock();
        if insert {
            rows.push(about.clone());
        } else {
            replace(&mut rows, |a| a.id, about, "AboutUs")?;
        }
        if about.is_active {
            for row in rows.iter_mut().filter(|r| r.id != about.id) {
                row.is_active = false;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AboutRepository for MemoryAbout {
    async fn find_active(&self) -> RepoResult<Option<AboutUs>> {
        Ok(self.0.lock().iter().find(|a| a.is_active).cloned())
    }
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AboutUs>> {
        Ok(self.0.lock().iter().find(|a| a.id == id).cloned())
    }
    async fn list(&self) -> RepoResult<Vec<AboutUs>> {
        Ok(self.0.lock().clone())
    }
    async fn create(&self, about: &AboutUs) -> RepoResult<()> {
        self.save(about, true)
    }
    async fn update(&self, about: &AboutUs) -> RepoResult<()> {
        self.save(about, false)
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove(&mut self.0.lock(), |a| a.id, id))
    }
}

#[derive(Default)]
pub struct MemoryCategories(pub Mutex<Vec<ServiceCategory>>);

#[async_trait]
impl CategoryRepository for MemoryCategories {
    async fn list_active(&self) -> RepoResult<Vec<ServiceCategory>> {
        let mut rows: Vec<_> = self.0.lock().iter().filter(|c| c.is_active).cloned().collect();
        rows.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        Ok(rows)
    }
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<ServiceCategory>> {
        let rows: Vec<_> = self
            .0
            .lock()
            .iter()
            .filter(|c| query.is_active.is_none_or(|a| c.is_active == a))
            .filter(|c| query.search.as_deref().is_none_or(|q| contains(&c.name, q)))
            .cloned()
            .collect();
        Ok(page_of(&rows, query.limit, query.offset))
    }
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ServiceCategory>> {
        Ok(self.0.lock().iter().find(|c| c.id == id).cloned())
    }
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> RepoResult<bool> {
        Ok(self
            .0
            .lock()
            .iter()
            .any(|c| c.slug == slug && Some(c.id) != exclude))
    }
    async fn create(&self, category: &ServiceCategory) -> RepoResult<()> {
        let mut rows = self.0.lock();
        if rows.iter().any(|c| c.slug == category.slug) {
            return Err(DomainError::SlugTaken(category.slug.clone()));
        }
        rows.push(category.clone());
        Ok(())
    }
    async fn update(&self, category: &ServiceCategory) -> RepoResult<()> {
        replace(&mut self.0.lock(), |c| c.id, category, "ServiceCategory")
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove(&mut self.0.lock(), |c| c.id, id))
    }
}

/// Services and portfolio share a store so the relational queries work
#[derive(Default)]
pub struct MemoryCatalog {
    pub services: Mutex<Vec<Service>>,
    pub portfolio: Mutex<Vec<PortfolioItem>>,
}

impl MemoryCatalog {
    fn active_services(&self) -> Vec<Service> {
        let mut rows: Vec<_> = self
            .services
            .lock()
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        rows
    }

    fn active_portfolio(&self) -> Vec<PortfolioItem> {
        let mut rows: Vec<_> = self
            .portfolio
            .lock()
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            match (a.date_completed, b.date_completed) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
            .then(b.created_at.cmp(&a.created_at))
        });
        rows
    }
}

#[async_trait]
impl ServiceRepository for MemoryCatalog {
    async fn list_active(&self, limit: Option<i64>) -> RepoResult<Vec<Service>> {
        let rows = self.active_services();
        Ok(match limit {
            Some(limit) => window(&rows, limit, 0),
            None => rows,
        })
    }
    async fn list_active_by_name(&self) -> RepoResult<Vec<Service>> {
        let mut rows = self.active_services();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
    async fn search_active(&self, query: &CatalogQuery) -> RepoResult<Page<Service>> {
        let rows: Vec<_> = self
            .active_services()
            .into_iter()
            .filter(|s| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|q| contains(&s.name, q) || contains(&s.description, q))
            })
            .collect();
        Ok(page_of(&rows, query.limit, query.offset))
    }
    async fn find_active_by_slug(&self, slug: &str) -> RepoResult<Option<Service>> {
        Ok(self.active_services().into_iter().find(|s| s.slug == slug))
    }
    async fn find_related(&self, service: &Service, limit: i64) -> RepoResult<Vec<Service>> {
        let mut rows: Vec<_> = self
            .active_services()
            .into_iter()
            .filter(|s| s.id != service.id)
            .collect();
        rows.sort_by_key(|s| {
            !(service.category_id.is_some() && s.category_id == service.category_id)
        });
        Ok(window(&rows, limit, 0))
    }
    async fn list_with_active_works(&self) -> RepoResult<Vec<Service>> {
        let works = self.active_portfolio();
        Ok(self
            .active_services()
            .into_iter()
            .filter(|s| works.iter().any(|w| w.service_id == Some(s.id)))
            .collect())
    }
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Service>> {
        let rows: Vec<_> = self
            .services
            .lock()
            .iter()
            .filter(|s| query.is_active.is_none_or(|a| s.is_active == a))
            .filter(|s| query.search.as_deref().is_none_or(|q| contains(&s.name, q)))
            .cloned()
            .collect();
        Ok(page_of(&rows, query.limit, query.offset))
    }
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Service>> {
        Ok(self.services.lock().iter().find(|s| s.id == id).cloned())
    }
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Service>> {
        Ok(self.services.lock().iter().find(|s| s.name == name).cloned())
    }
    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> RepoResult<bool> {
        Ok(self
            .services
            .lock()
            .iter()
            .any(|s| s.slug == slug && Some(s.id) != exclude))
    }
    async fn create(&self, service: &Service) -> RepoResult<()> {
        let mut rows = self.services.lock();
        if rows.iter().any(|s| s.slug == service.slug) {
            return Err(DomainError::SlugTaken(service.slug.clone()));
        }
        rows.push(service.clone());
        Ok(())
    }
    async fn update(&self, service: &Service) -> RepoResult<()> {
        replace(&mut self.services.lock(), |s| s.id, service, "Service")
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let removed = remove(&mut self.services.lock(), |s| s.id, id);
        if removed {
            for work in self.portfolio.lock().iter_mut() {
                if work.service_id == Some(id) {
                    work.service_id = None;
                }
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl PortfolioRepository for MemoryCatalog {
    async fn list_featured(&self, limit: i64) -> RepoResult<Vec<PortfolioItem>> {
        let rows: Vec<_> = self
            .active_portfolio()
            .into_iter()
            .filter(|p| p.is_featured)
            .collect();
        Ok(window(&rows, limit, 0))
    }
    async fn search_active(&self, query: &PortfolioQuery) -> RepoResult<Page<PortfolioItem>> {
        let service_id = query.service_slug.as_deref().map(|slug| {
            self.services
                .lock()
                .iter()
                .find(|s| s.slug == slug)
                .map(|s| s.id)
        });
        let rows: Vec<_> = self
            .active_portfolio()
            .into_iter()
            .filter(|p| match service_id {
                None => true,
                Some(None) => false,
                Some(Some(id)) => p.service_id == Some(id),
            })
            .filter(|p| {
                query.search.as_deref().is_none_or(|q| {
                    contains(&p.title, q)
                        || contains(&p.description, q)
                        || p.client.as_deref().is_some_and(|c| contains(c, q))
                })
            })
            .collect();
        Ok(page_of(&rows, query.limit, query.offset))
    }
    async fn list_active_by_service(
        &self,
        service_id: Uuid,
        limit: i64,
    ) -> RepoResult<Vec<PortfolioItem>> {
        let rows: Vec<_> = self
            .active_portfolio()
            .into_iter()
            .filter(|p| p.service_id == Some(service_id))
            .collect();
        Ok(window(&rows, limit, 0))
    }
    async fn count_active_by_service(&self, service_id: Uuid) -> RepoResult<i64> {
        Ok(self
            .active_portfolio()
            .iter()
            .filter(|p| p.service_id == Some(service_id))
            .count() as i64)
    }
    async fn list_all_active(&self) -> RepoResult<Vec<PortfolioItem>> {
        Ok(self.active_portfolio())
    }
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<PortfolioItem>> {
        let rows: Vec<_> = self
            .portfolio
            .lock()
            .iter()
            .filter(|p| query.is_active.is_none_or(|a| p.is_active == a))
            .filter(|p| query.search.as_deref().is_none_or(|q| contains(&p.title, q)))
            .cloned()
            .collect();
        Ok(page_of(&rows, query.limit, query.offset))
    }
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<PortfolioItem>> {
        Ok(self.portfolio.lock().iter().find(|p| p.id == id).cloned())
    }
    async fn find_by_title(&self, title: &str) -> RepoResult<Option<PortfolioItem>> {
        Ok(self.portfolio.lock().iter().find(|p| p.title == title).cloned())
    }
    async fn create(&self, item: &PortfolioItem) -> RepoResult<()> {
        self.portfolio.lock().push(item.clone());
        Ok(())
    }
    async fn update(&self, item: &PortfolioItem) -> RepoResult<()> {
        replace(&mut self.portfolio.lock(), |p| p.id, item, "PortfolioItem")
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove(&mut self.portfolio.lock(), |p| p.id, id))
    }
}

#[derive(Default)]
pub struct MemoryTestimonials(pub Mutex<Vec<Testimonial>>);

#[async_trait]
impl TestimonialRepository for MemoryTestimonials {
    async fn list_active(&self, limit: i64) -> RepoResult<Vec<Testimonial>> {
        let mut rows: Vec<_> = self.0.lock().iter().filter(|t| t.is_active).cloned().collect();
        rows.sort_by(|a, b| a.order.cmp(&b.order).then(b.created_at.cmp(&a.created_at)));
        Ok(window(&rows, limit, 0))
    }
    async fn list(&self, query: &ListQuery) -> RepoResult<Page<Testimonial>> {
        let rows: Vec<_> = self
            .0
            .lock()
            .iter()
            .filter(|t| query.is_active.is_none_or(|a| t.is_active == a))
            .filter(|t| query.search.as_deref().is_none_or(|q| contains(&t.name, q)))
            .cloned()
            .collect();
        Ok(page_of(&rows, query.limit, query.offset))
    }
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Testimonial>> {
        Ok(self.0.lock().iter().find(|t| t.id == id).cloned())
    }
    async fn create(&self, testimonial: &Testimonial) -> RepoResult<()> {
        self.0.lock().push(testimonial.clone());
        Ok(())
    }
    async fn update(&self, testimonial: &Testimonial) -> RepoResult<()> {
        replace(&mut self.0.lock(), |t| t.id, testimonial, "Testimonial")
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove(&mut self.0.lock(), |t| t.id, id))
    }
}

#[derive(Default)]
pub struct MemoryStatistics(pub Mutex<Vec<Statistic>>);

#[async_trait]
impl StatisticRepository for MemoryStatistics {
    async fn list_active(&self) -> RepoResult<Vec<Statistic>> {
        let mut rows: Vec<_> = self.0.lock().iter().filter(|s| s.is_active).cloned().collect();
        rows.sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
        Ok(rows)
    }
    async fn list(&self) -> RepoResult<Vec<Statistic>> {
        Ok(self.0.lock().clone())
    }
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Statistic>> {
        Ok(self.0.lock().iter().find(|s| s.id == id).cloned())
    }
    async fn find_by_label(&self, label: &str) -> RepoResult<Option<Statistic>> {
        Ok(self.0.lock().iter().find(|s| s.label == label).cloned())
    }
    async fn create(&self, statistic: &Statistic) -> RepoResult<()> {
        self.0.lock().push(statistic.clone());
        Ok(())
    }
    async fn update(&self, statistic: &Statistic) -> RepoResult<()> {
        replace(&mut self.0.lock(), |s| s.id, statistic, "Statistic")
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove(&mut self.0.lock(), |s| s.id, id))
    }
}

#[derive(Default)]
pub struct MemoryTelegramChats(pub Mutex<Vec<TelegramChat>>);

#[async_trait]
impl TelegramChatRepository for MemoryTelegramChats {
    async fn list_active(&self) -> RepoResult<Vec<TelegramChat>> {
        Ok(self.0.lock().iter().filter(|c| c.is_active).cloned().collect())
    }
    async fn list(&self) -> RepoResult<Vec<TelegramChat>> {
        Ok(self.0.lock().clone())
    }
    async fn upsert(
        &self,
        chat_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> RepoResult<TelegramChat> {
        let mut rows = self.0.lock();
        if let Some(chat) = rows.iter_mut().find(|c| c.chat_id == chat_id) {
            chat.username = username.map(str::to_string);
            chat.first_name = first_name.map(str::to_string);
            chat.is_active = true;
            return Ok(chat.clone());
        }
        let chat = TelegramChat::new(
            chat_id,
            username.map(str::to_string),
            first_name.map(str::to_string),
        );
        rows.push(chat.clone());
        Ok(chat)
    }
    async fn set_active(&self, id: Uuid, is_active: bool) -> RepoResult<bool> {
        Ok(self
            .0
            .lock()
            .iter_mut()
            .find(|c| c.id == id)
            .map(|c| c.is_active = is_active)
            .is_some())
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove(&mut self.0.lock(), |c| c.id, id))
    }
}

/// Contact store; `fail_writes` simulates a database outage on insert
#[derive(Default)]
pub struct MemoryContacts {
    pub rows: Mutex<Vec<ContactMessage>>,
    pub fail_writes: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl ContactMessageRepository for MemoryContacts {
    async fn create(&self, message: &ContactMessage) -> RepoResult<()> {
        if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("unavailable".to_string()));
        }
        self.rows.lock().push(message.clone());
        Ok(())
    }
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ContactMessage>> {
        Ok(self.rows.lock().iter().find(|m| m.id == id).cloned())
    }
    async fn list(&self, query: &ContactQuery) -> RepoResult<Page<ContactMessage>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .iter()
            .filter(|m| query.status.is_none_or(|s| m.status == s))
            .filter(|m| query.is_read.is_none_or(|r| m.is_read == r))
            .filter(|m| {
                query.search.as_deref().is_none_or(|q| {
                    contains(&m.name, q)
                        || contains(&m.phone, q)
                        || contains(&m.message, q)
                        || m.email.as_deref().is_some_and(|e| contains(e, q))
                })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page_of(&rows, query.limit, query.offset))
    }
    async fn count_unread(&self) -> RepoResult<i64> {
        Ok(self.rows.lock().iter().filter(|m| !m.is_read).count() as i64)
    }
    async fn update(&self, message: &ContactMessage) -> RepoResult<()> {
        replace(&mut self.rows.lock(), |m| m.id, message, "ContactMessage")
    }
    async fn mark_read(&self, ids: &[Uuid]) -> RepoResult<u64> {
        let mut count = 0;
        for row in self.rows.lock().iter_mut().filter(|m| ids.contains(&m.id)) {
            row.is_read = true;
            count += 1;
        }
        Ok(count)
    }
    async fn set_status(&self, ids: &[Uuid], status: ContactStatus) -> RepoResult<u64> {
        let mut count = 0;
        for row in self.rows.lock().iter_mut().filter(|m| ids.contains(&m.id)) {
            row.status = status;
            row.is_read = true;
            count += 1;
        }
        Ok(count)
    }
    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        Ok(remove(&mut self.rows.lock(), |m| m.id, id))
    }
}

#[derive(Default)]
pub struct MemoryAdmins(pub Mutex<Vec<(AdminUser, String)>>);

#[async_trait]
impl AdminUserRepository for MemoryAdmins {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AdminUser>> {
        Ok(self.0.lock().iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>> {
        Ok(self
            .0
            .lock()
            .iter()
            .find(|(u, _)| u.username.eq_ignore_ascii_case(username))
            .map(|(u, _)| u.clone()))
    }
    async fn create(&self, user: &AdminUser, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.0.lock();
        if rows.iter().any(|(u, _)| u.username.eq_ignore_ascii_case(&user.username)) {
            return Err(DomainError::UsernameTaken);
        }
        rows.push((user.clone(), password_hash.to_string()));
        Ok(())
    }
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        Ok(self.0.lock().iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.0.lock();
        let row = rows
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or_else(|| DomainError::not_found("AdminUser", id))?;
        row.1 = password_hash.to_string();
        Ok(())
    }
    async fn record_login(&self, id: Uuid) -> RepoResult<()> {
        if let Some((user, _)) = self.0.lock().iter_mut().find(|(u, _)| u.id == id) {
            user.last_login_at = Some(chrono::Utc::now());
        }
        Ok(())
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Forwards every notice to a channel and reports a fixed outcome
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<ContactNotice>,
    report: DeliveryReport,
}

impl RecordingNotifier {
    pub fn new(report: DeliveryReport) -> (Self, mpsc::UnboundedReceiver<ContactNotice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, report }, rx)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_contact(&self, notice: &ContactNotice) -> DeliveryReport {
        let _ = self.tx.send(notice.clone());
        self.report
    }
}

// ============================================================================
// Context
// ============================================================================

/// Handles on every in-memory store behind a [`memory_context`]
#[derive(Clone, Default)]
pub struct MemoryStores {
    pub settings: Arc<MemorySettings>,
    pub slides: Arc<MemorySlides>,
    pub about: Arc<MemoryAbout>,
    pub categories: Arc<MemoryCategories>,
    pub catalog: Arc<MemoryCatalog>,
    pub testimonials: Arc<MemoryTestimonials>,
    pub statistics: Arc<MemoryStatistics>,
    pub telegram_chats: Arc<MemoryTelegramChats>,
    pub contacts: Arc<MemoryContacts>,
    pub admins: Arc<MemoryAdmins>,
}

impl MemoryStores {
    pub fn repositories(&self) -> Repositories {
        Repositories {
            settings: self.settings.clone(),
            slides: self.slides.clone(),
            about: self.about.clone(),
            categories: self.categories.clone(),
            services: self.catalog.clone(),
            portfolio: self.catalog.clone(),
            testimonials: self.testimonials.clone(),
            statistics: self.statistics.clone(),
            telegram_chats: self.telegram_chats.clone(),
            contacts: self.contacts.clone(),
            admins: self.admins.clone(),
        }
    }
}

/// Context over fresh in-memory stores with the given notifier
pub fn memory_context(notifier: Arc<dyn Notifier>) -> (ServiceContext, MemoryStores) {
    let stores = MemoryStores::default();
    let ctx = ServiceContextBuilder::new()
        .repositories(stores.repositories())
        .notifier(notifier)
        .jwt_service(Arc::new(JwtService::new(TEST_JWT_SECRET, 900, 604_800)))
        .build()
        .expect("repositories and jwt are set");
    (ctx, stores)
}
