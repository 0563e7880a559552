//! PostgreSQL pool construction

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Sizing and timeouts for the shared `PgPool`
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a handler waits for a free connection
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl PoolSettings {
    pub fn new(url: impl Into<String>, max_connections: u32, min_connections: u32) -> Self {
        Self {
            url: url.into(),
            max_connections: max_connections.max(1),
            min_connections: min_connections.min(max_connections.max(1)),
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
        }
    }
}

/// Connect a pool; fails if the first connection cannot be made
pub async fn connect(settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .connect(&settings.url)
        .await?;
    tracing::debug!(
        max = settings.max_connections,
        min = settings.min_connections,
        "postgres pool ready"
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_default_timeouts() {
        let settings = PoolSettings::new("postgres://db/site", 20, 2);
        assert_eq!(settings.url, "postgres://db/site");
        assert_eq!(settings.max_connections, 20);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(10));
        assert_eq!(settings.idle_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_min_never_exceeds_max() {
        let settings = PoolSettings::new("postgres://db/site", 0, 5);
        assert_eq!(settings.max_connections, 1);
        assert_eq!(settings.min_connections, 1);
    }
}
