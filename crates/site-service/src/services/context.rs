//! Service context - dependency container for services
//!
//! Holds the repositories, the lead notifier and the auth helpers.

use std::sync::Arc;
use std::time::Duration;

use site_cache::{LoginLockout, MemoryCounterStore};
use site_common::auth::{JwtService, PasswordService};
use site_core::{
    AboutRepository, AdminUserRepository, CategoryRepository, ContactMessageRepository,
    NoopNotifier, Notifier, PortfolioRepository, ServiceRepository, SiteSettingsRepository,
    SlideRepository, StatisticRepository, TelegramChatRepository, TestimonialRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::media::MediaStorage;

/// Failed logins allowed per (username, address) before lockout
pub const DEFAULT_LOGIN_FAILURE_LIMIT: u64 = 5;

/// Lockout duration once the limit is reached
pub const DEFAULT_LOGIN_COOLOFF: Duration = Duration::from_secs(3600);

/// Every repository the services use
#[derive(Clone)]
pub struct Repositories {
    pub settings: Arc<dyn SiteSettingsRepository>,
    pub slides: Arc<dyn SlideRepository>,
    pub about: Arc<dyn AboutRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub portfolio: Arc<dyn PortfolioRepository>,
    pub testimonials: Arc<dyn TestimonialRepository>,
    pub statistics: Arc<dyn StatisticRepository>,
    pub telegram_chats: Arc<dyn TelegramChatRepository>,
    pub contacts: Arc<dyn ContactMessageRepository>,
    pub admins: Arc<dyn AdminUserRepository>,
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    repos: Repositories,
    notifier: Arc<dyn Notifier>,
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    lockout: LoginLockout,
    media: MediaStorage,
}

impl ServiceContext {
    pub fn new(
        repos: Repositories,
        notifier: Arc<dyn Notifier>,
        jwt_service: Arc<JwtService>,
        lockout: LoginLockout,
        media: MediaStorage,
    ) -> Self {
        Self {
            repos,
            notifier,
            jwt_service,
            password_service: PasswordService::new(),
            lockout,
            media,
        }
    }

    // === Repositories ===

    pub fn settings_repo(&self) -> &dyn SiteSettingsRepository {
        self.repos.settings.as_ref()
    }

    pub fn slide_repo(&self) -> &dyn SlideRepository {
        self.repos.slides.as_ref()
    }

    pub fn about_repo(&self) -> &dyn AboutRepository {
        self.repos.about.as_ref()
    }

    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.repos.categories.as_ref()
    }

    pub fn service_repo(&self) -> &dyn ServiceRepository {
        self.repos.services.as_ref()
    }

    pub fn portfolio_repo(&self) -> &dyn PortfolioRepository {
        self.repos.portfolio.as_ref()
    }

    pub fn testimonial_repo(&self) -> &dyn TestimonialRepository {
        self.repos.testimonials.as_ref()
    }

    pub fn statistic_repo(&self) -> &dyn StatisticRepository {
        self.repos.statistics.as_ref()
    }

    pub fn telegram_chat_repo(&self) -> &dyn TelegramChatRepository {
        self.repos.telegram_chats.as_ref()
    }

    pub fn contact_repo(&self) -> &dyn ContactMessageRepository {
        self.repos.contacts.as_ref()
    }

    pub fn admin_repo(&self) -> &dyn AdminUserRepository {
        self.repos.admins.as_ref()
    }

    // === Collaborators ===

    /// Shared handle, for work that outlives the request
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn lockout(&self) -> &LoginLockout {
        &self.lockout
    }

    pub fn media(&self) -> &MediaStorage {
        &self.media
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("lockout", &self.lockout)
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    repos: Option<Repositories>,
    notifier: Option<Arc<dyn Notifier>>,
    jwt_service: Option<Arc<JwtService>>,
    lockout: Option<LoginLockout>,
    media: Option<MediaStorage>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(mut self, repos: Repositories) -> Self {
        self.repos = Some(repos);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn lockout(mut self, lockout: LoginLockout) -> Self {
        self.lockout = Some(lockout);
        self
    }

    pub fn media(mut self, media: MediaStorage) -> Self {
        self.media = Some(media);
        self
    }

    /// Build the ServiceContext
    ///
    /// The notifier defaults to a no-op, the lockout to an in-process
    /// counter and media storage to `./media`.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if repositories or the JWT service are missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let repos = self
            .repos
            .ok_or_else(|| ServiceError::validation("repositories are required"))?;
        let jwt_service = self
            .jwt_service
            .ok_or_else(|| ServiceError::validation("jwt_service is required"))?;

        let lockout = self.lockout.unwrap_or_else(|| {
            LoginLockout::new(
                Arc::new(MemoryCounterStore::new()),
                DEFAULT_LOGIN_FAILURE_LIMIT,
                DEFAULT_LOGIN_COOLOFF,
            )
        });

        Ok(ServiceContext::new(
            repos,
            self.notifier.unwrap_or_else(|| Arc::new(NoopNotifier)),
            jwt_service,
            lockout,
            self.media.unwrap_or_default(),
        ))
    }
}
