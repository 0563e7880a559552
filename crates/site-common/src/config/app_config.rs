//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub security: SecurityConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub telegram: TelegramConfig,
    pub admin: AdminConfig,
    pub mail: MailConfig,
    pub logging: LoggingConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
    #[serde(default)]
    pub debug: bool,
    pub secret_key: String,
    /// Accepted `Host` header values; `*` accepts anything
    pub allowed_hosts: Vec<String>,
}

impl AppSettings {
    /// Whether a `Host` header value (port stripped) may be served
    #[must_use]
    pub fn is_host_allowed(&self, host: &str) -> bool {
        let host = strip_port(host);
        self.allowed_hosts.iter().any(|allowed| {
            allowed == "*"
                || allowed.eq_ignore_ascii_case(host)
                || allowed
                    .strip_prefix('.')
                    .is_some_and(|domain| host == domain || host.ends_with(allowed.as_str()))
        })
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [::1]:8000
        return host.split(']').next().map_or(host, |h| &host[..=h.len()]);
    }
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration, used for shared rate-limit counters
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration for the admin API
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Fixed-window rate limiting
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests per window for ordinary routes
    pub requests: u64,
    /// Requests per window for the contact form
    pub contact_requests: u64,
    pub window_secs: u64,
}

/// Request screening and admin login protection
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Reject requests matching an attack pattern instead of only logging them
    pub suspicious_block: bool,
    /// Failed logins allowed per (username, address) before lockout
    pub login_failure_limit: u64,
    pub login_cooloff_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Media and static file locations
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub media_root: String,
    pub static_root: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u32,
}

impl StorageConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }
}

/// Telegram Bot API access
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    /// Overridable for tests and self-hosted Bot API servers
    pub api_base: String,
}

/// Admin surface mount point
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Raw `ADMIN_URL` value, e.g. `admin/` or `secret-panel/`
    pub url: String,
}

impl AdminConfig {
    /// Normalized mount path: leading slash, no trailing slash
    #[must_use]
    pub fn mount_path(&self) -> String {
        let trimmed = self.url.trim_matches('/');
        if trimmed.is_empty() {
            "/admin".to_string()
        } else {
            format!("/{trimmed}")
        }
    }
}

/// Outgoing mail transport settings
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
}

/// Log output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub to_file: bool,
    pub dir: String,
}

// Default value functions
fn default_app_name() -> String {
    "bright-city".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_allowed_hosts() -> Vec<String> {
    vec!["localhost".to_string(), "127.0.0.1".to_string()]
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_refresh_token_expiry() -> i64 {
    604_800 // 7 days
}

fn default_rate_limit_requests() -> u64 {
    100
}

fn default_contact_rate_limit_requests() -> u64 {
    10
}

fn default_rate_limit_window() -> u64 {
    60
}

fn default_login_failure_limit() -> u64 {
    5
}

fn default_login_cooloff() -> u64 {
    3600
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_media_root() -> String {
    "./media".to_string()
}

fn default_static_root() -> String {
    "./static".to_string()
}

fn default_max_file_size() -> u32 {
    10
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_admin_url() -> String {
    "admin/".to_string()
}

fn default_email_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "noreply@localhost".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

/// Secret used when `DEBUG` is on and no `SECRET_KEY` was given
const INSECURE_DEV_SECRET: &str = "insecure-development-secret-change-me";

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Typed access to a variable source
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn parse_or<T: FromStr>(&self, key: &'static str, default: fn() -> T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(default()),
        }
    }

    fn flag(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue(key, raw)),
            None => Ok(default),
        }
    }

    fn list_or(&self, key: &str, default: fn() -> Vec<String>) -> Vec<String> {
        self.get(key).map_or_else(default, |raw| parse_list(&raw))
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let debug = vars.flag("DEBUG", false)?;
        let secret_key = match vars.get("SECRET_KEY") {
            Some(key) => key,
            None if debug => INSECURE_DEV_SECRET.to_string(),
            None => return Err(ConfigError::MissingVar("SECRET_KEY")),
        };

        let env = vars
            .get("APP_ENV")
            .and_then(|s| match s.to_lowercase().as_str() {
                "production" => Some(Environment::Production),
                "staging" => Some(Environment::Staging),
                "development" => Some(Environment::Development),
                _ => None,
            })
            .unwrap_or(if debug {
                Environment::Development
            } else {
                Environment::Production
            });

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env,
                debug,
                secret_key: secret_key.clone(),
                allowed_hosts: vars.list_or("ALLOWED_HOSTS", default_allowed_hosts),
            },
            server: ServerConfig {
                host: vars.get("SERVER_HOST").unwrap_or_else(default_host),
                port: vars.parse_or("SERVER_PORT", default_port)?,
                request_timeout_secs: vars
                    .parse_or("REQUEST_TIMEOUT_SECS", default_request_timeout)?,
            },
            database: DatabaseConfig {
                url: vars
                    .get("DATABASE_URL")
                    .ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: vars
                    .parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars
                    .parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            redis: match vars.get("REDIS_URL") {
                Some(url) => Some(RedisConfig {
                    url,
                    max_connections: vars
                        .parse_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
                }),
                None => None,
            },
            jwt: JwtConfig {
                secret: secret_key,
                access_token_expiry: vars
                    .parse_or("JWT_ACCESS_EXPIRY", default_access_token_expiry)?,
                refresh_token_expiry: vars
                    .parse_or("JWT_REFRESH_EXPIRY", default_refresh_token_expiry)?,
            },
            rate_limit: RateLimitConfig {
                enabled: vars.flag("RATE_LIMIT_ENABLED", true)?,
                requests: vars.parse_or("RATE_LIMIT_REQUESTS", default_rate_limit_requests)?,
                contact_requests: vars.parse_or(
                    "CONTACT_RATE_LIMIT_REQUESTS",
                    default_contact_rate_limit_requests,
                )?,
                window_secs: vars.parse_or("RATE_LIMIT_WINDOW", default_rate_limit_window)?,
            },
            security: SecurityConfig {
                suspicious_block: vars.flag("SUSPICIOUS_BLOCK", false)?,
                login_failure_limit: vars
                    .parse_or("LOGIN_FAILURE_LIMIT", default_login_failure_limit)?,
                login_cooloff_secs: vars.parse_or("LOGIN_COOLOFF_SECS", default_login_cooloff)?,
            },
            cors: CorsConfig {
                allowed_origins: vars.list_or("CORS_ALLOWED_ORIGINS", default_cors_origins),
            },
            storage: StorageConfig {
                media_root: vars.get("MEDIA_ROOT").unwrap_or_else(default_media_root),
                static_root: vars.get("STATIC_ROOT").unwrap_or_else(default_static_root),
                max_file_size_mb: vars.parse_or("MAX_FILE_SIZE_MB", default_max_file_size)?,
            },
            telegram: TelegramConfig {
                bot_token: vars.get("TELEGRAM_BOT_TOKEN"),
                api_base: vars
                    .get("TELEGRAM_API_BASE")
                    .unwrap_or_else(default_telegram_api_base),
            },
            admin: AdminConfig {
                url: vars.get("ADMIN_URL").unwrap_or_else(default_admin_url),
            },
            mail: MailConfig {
                host: vars.get("EMAIL_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: vars.parse_or("EMAIL_PORT", default_email_port)?,
                use_tls: vars.flag("EMAIL_USE_TLS", true)?,
                username: vars.get("EMAIL_HOST_USER"),
                password: vars.get("EMAIL_HOST_PASSWORD"),
                from_address: vars
                    .get("DEFAULT_FROM_EMAIL")
                    .unwrap_or_else(default_from_email),
            },
            logging: LoggingConfig {
                level: vars.get("LOG_LEVEL").unwrap_or_else(default_log_level),
                to_file: vars.flag("LOG_TO_FILE", true)?,
                dir: vars.get("LOG_DIR").unwrap_or_else(default_log_dir),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(move |key| vars.get(key).cloned())
    }

    #[test]
    fn test_minimal_debug_config() {
        let config = load(&[("DEBUG", "true"), ("DATABASE_URL", "postgres://localhost/site")])
            .unwrap();

        assert!(config.app.debug);
        assert!(config.app.env.is_development());
        assert_eq!(config.app.secret_key, INSECURE_DEV_SECRET);
        assert_eq!(config.app.allowed_hosts, vec!["localhost", "127.0.0.1"]);
        assert!(config.redis.is_none());
        assert_eq!(config.rate_limit.requests, 100);
        assert_eq!(config.rate_limit.contact_requests, 10);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.security.login_failure_limit, 5);
        assert_eq!(config.security.login_cooloff_secs, 3600);
        assert!(!config.security.suspicious_block);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
        assert_eq!(config.admin.mount_path(), "/admin");
        assert!(config.logging.to_file);
    }

    #[test]
    fn test_secret_required_outside_debug() {
        let err = load(&[("DATABASE_URL", "postgres://localhost/site")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("SECRET_KEY")));
    }

    #[test]
    fn test_database_url_required() {
        let err = load(&[("DEBUG", "1")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_number_reported() {
        let err = load(&[
            ("DEBUG", "1"),
            ("DATABASE_URL", "postgres://localhost/site"),
            ("SERVER_PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("SERVER_PORT", _)));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/site"),
            ("ALLOWED_HOSTS", "example.com, www.example.com"),
            ("ADMIN_URL", "panel-42/"),
            ("REDIS_URL", "redis://localhost"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("LOG_TO_FILE", "false"),
        ])
        .unwrap();

        assert!(config.app.env.is_production());
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.app.allowed_hosts, vec!["example.com", "www.example.com"]);
        assert_eq!(config.admin.mount_path(), "/panel-42");
        assert_eq!(config.redis.unwrap().url, "redis://localhost");
        assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
        assert!(!config.logging.to_file);
    }

    #[test]
    fn test_host_matching() {
        let settings = AppSettings {
            name: default_app_name(),
            env: Environment::Production,
            debug: false,
            secret_key: String::new(),
            allowed_hosts: vec!["localhost".to_string(), ".example.com".to_string()],
        };

        assert!(settings.is_host_allowed("localhost:8000"));
        assert!(settings.is_host_allowed("example.com"));
        assert!(settings.is_host_allowed("www.example.com"));
        assert!(!settings.is_host_allowed("evil.com"));
        assert!(!settings.is_host_allowed("notexample.com"));

        let open = AppSettings {
            allowed_hosts: vec!["*".to_string()],
            ..settings
        };
        assert!(open.is_host_allowed("anything.test"));
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_admin_mount_path() {
        let admin = |url: &str| AdminConfig {
            url: url.to_string(),
        };
        assert_eq!(admin("admin/").mount_path(), "/admin");
        assert_eq!(admin("/secret/panel/").mount_path(), "/secret/panel");
        assert_eq!(admin("").mount_path(), "/admin");
    }
}
