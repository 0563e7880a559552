//! Server setup and initialization
//!
//! Provides the application builder and the server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use site_cache::{
    LoginLockout, MemoryCounterStore, RateLimiter, RedisCounterStore, RedisPool, SharedCounterStore,
};
use site_common::{shutdown_signal, AppConfig, AppError, JwtService};
use site_core::{SiteSettingsRepository, TelegramChatRepository};
use site_db::{
    PoolSettings, PgAboutRepository, PgAdminUserRepository, PgCategoryRepository,
    PgContactMessageRepository, PgPool, PgPortfolioRepository, PgServiceRepository,
    PgSiteSettingsRepository, PgSlideRepository, PgStatisticRepository, PgTelegramChatRepository,
    PgTestimonialRepository,
};
use site_service::{MediaStorage, Repositories, ServiceContextBuilder};
use site_telegram::{BotClient, TelegramNotifier};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;
use crate::templates::Templates;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router(state.config());
    let router = apply_middleware(router, &state);
    router.with_state(state)
}

/// Postgres-backed repositories sharing one pool
pub fn repositories(pool: &PgPool) -> Repositories {
    Repositories {
        settings: Arc::new(PgSiteSettingsRepository::new(pool.clone())),
        slides: Arc::new(PgSlideRepository::new(pool.clone())),
        about: Arc::new(PgAboutRepository::new(pool.clone())),
        categories: Arc::new(PgCategoryRepository::new(pool.clone())),
        services: Arc::new(PgServiceRepository::new(pool.clone())),
        portfolio: Arc::new(PgPortfolioRepository::new(pool.clone())),
        testimonials: Arc::new(PgTestimonialRepository::new(pool.clone())),
        statistics: Arc::new(PgStatisticRepository::new(pool.clone())),
        telegram_chats: Arc::new(PgTelegramChatRepository::new(pool.clone())),
        contacts: Arc::new(PgContactMessageRepository::new(pool.clone())),
        admins: Arc::new(PgAdminUserRepository::new(pool.clone())),
    }
}

/// Redis when configured, otherwise counters live in this process
fn counter_store(config: &AppConfig) -> Result<SharedCounterStore, AppError> {
    match &config.redis {
        Some(redis) => {
            info!("Using Redis for rate-limit counters");
            let pool = RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            Ok(Arc::new(RedisCounterStore::new(pool)))
        }
        None => {
            info!("REDIS_URL not set; rate-limit counters are in-process");
            Ok(Arc::new(MemoryCounterStore::new()))
        }
    }
}

/// Environment token first, then the active settings row
async fn bot_client(config: &AppConfig, settings: &dyn SiteSettingsRepository) -> Option<BotClient> {
    let token = match config.telegram.bot_token.clone() {
        Some(token) => Some(token),
        None => match settings.find_active().await {
            Ok(row) => row
                .and_then(|s| s.telegram_bot_token)
                .filter(|token| !token.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "Could not read the bot token from site settings");
                None
            }
        },
    };

    let Some(token) = token else {
        warn!("No Telegram bot token configured; lead notifications are disabled");
        return None;
    };
    match BotClient::new(token, &config.telegram.api_base) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!(error = %e, "Telegram client unavailable; lead notifications are disabled");
            None
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = site_db::connect(&PoolSettings::new(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    ))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let repos = repositories(&pool);
    let counters = counter_store(&config)?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let lockout = LoginLockout::new(
        counters.clone(),
        config.security.login_failure_limit,
        Duration::from_secs(config.security.login_cooloff_secs),
    );
    let media = MediaStorage::new(config.storage.media_root.clone(), config.storage.max_file_size_bytes());

    let client = bot_client(&config, repos.settings.as_ref()).await;
    let chats: Arc<dyn TelegramChatRepository> = repos.telegram_chats.clone();
    let notifier = Arc::new(TelegramNotifier::new(client, chats));

    let service_context = ServiceContextBuilder::new()
        .repositories(repos)
        .notifier(notifier)
        .jwt_service(jwt_service)
        .lockout(lockout)
        .media(media)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let templates = Templates::new().map_err(|e| AppError::Config(format!("templates: {e}")))?;

    Ok(AppState::new(service_context, config, templates, RateLimiter::new(counters)).with_pool(pool))
}

/// Run the HTTP server until Ctrl-C or SIGTERM
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    let local = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Listener address unavailable: {e}")))?;
    info!("Server listening on http://{}", local);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, &addr).await
}
