//! # site-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod shutdown;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService,
    PasswordService, TokenPair, TokenKind,
};
pub use config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LoggingConfig, MailConfig, RateLimitConfig, RedisConfig, SecurityConfig,
    ServerConfig, StorageConfig, TelegramConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use shutdown::{shutdown_channel, shutdown_signal, spawn_signal_watcher};
pub use telemetry::{
    try_init_tracing_with_config, LogGuards, TracingConfig, TracingError,
};
