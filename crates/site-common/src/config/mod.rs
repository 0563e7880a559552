//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LoggingConfig, MailConfig, RateLimitConfig, RedisConfig, SecurityConfig,
    ServerConfig, StorageConfig, TelegramConfig,
};
