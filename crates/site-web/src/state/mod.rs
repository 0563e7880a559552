//! Shared handler state: services, config, compiled templates and counters

use std::sync::Arc;

use site_cache::RateLimiter;
use site_common::{AppConfig, JwtService};
use site_db::PgPool;
use site_service::ServiceContext;

use crate::templates::Templates;

#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    templates: Arc<Templates>,
    rate_limiter: RateLimiter,
    /// Checked by the readiness probe; absent in router tests
    pool: Option<PgPool>,
}

impl AppState {
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        templates: Templates,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            templates: Arc::new(templates),
            rate_limiter,
            pool: None,
        }
    }

    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Shortcut for the admin auth extractor
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("env", &self.config.app.env)
            .field("pool", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}
