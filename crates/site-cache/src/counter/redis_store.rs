//! Redis-backed counter store

use std::time::Duration;

use async_trait::async_trait;

use super::{CounterStore, Hit};
use crate::pool::{RedisPool, RedisResult};

/// Counters in Redis via `INCR` with a window-long expiry
#[derive(Debug, Clone)]
pub struct RedisCounterStore {
    pool: RedisPool,
}

impl RedisCounterStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn hit(&self, key: &str, window: Duration) -> RedisResult<Hit> {
        let window_secs = window.as_secs().max(1);
        let (count, ttl) = self.pool.incr_with_expiry(key, window_secs).await?;
        Ok(Hit {
            count,
            resets_in_secs: u64::try_from(ttl).unwrap_or(window_secs),
        })
    }

    async fn current(&self, key: &str) -> RedisResult<u64> {
        self.pool.get_count(key).await
    }

    async fn clear(&self, key: &str) -> RedisResult<()> {
        self.pool.delete(key).await?;
        Ok(())
    }
}
