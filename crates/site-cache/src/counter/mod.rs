//! Expiring counters shared across requests.
//!
//! Redis backs them when configured so every web process sees the same
//! counts; otherwise a process-local map is used.

mod memory;
mod redis_store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::pool::RedisResult;

pub use memory::MemoryCounterStore;
pub use redis_store::RedisCounterStore;

/// Result of one increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Count inside the current window, including this hit
    pub count: u64,
    /// Seconds until the window closes
    pub resets_in_secs: u64,
}

/// Atomic increment-with-expiry keyed by string
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Count one hit; the first hit of a window starts its expiry
    async fn hit(&self, key: &str, window: Duration) -> RedisResult<Hit>;

    /// Current count without incrementing
    async fn current(&self, key: &str) -> RedisResult<u64>;

    /// Drop the counter
    async fn clear(&self, key: &str) -> RedisResult<()>;
}

/// Counter store shared between middleware and services
pub type SharedCounterStore = Arc<dyn CounterStore>;
