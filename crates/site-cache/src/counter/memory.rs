//! In-process counter store

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use super::{CounterStore, Hit};
use crate::pool::RedisResult;

/// Expired windows are swept every this many hits
const SWEEP_EVERY: u64 = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u64,
    expires_at: Instant,
}

/// Counters in a concurrent map, for single-process deployments
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    windows: DashMap<String, Window>,
    hits: AtomicU64,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys, expired ones included until the next sweep
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn sweep(&self, now: Instant) {
        self.windows.retain(|_, window| window.expires_at > now);
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn hit(&self, key: &str, window: Duration) -> RedisResult<Hit> {
        let now = Instant::now();
        if self.hits.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.sweep(now);
        }

        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            expires_at: now + window,
        });
        if entry.expires_at <= now {
            *entry = Window {
                count: 0,
                expires_at: now + window,
            };
        }
        entry.count += 1;

        let remaining = entry.expires_at.saturating_duration_since(now);
        Ok(Hit {
            count: entry.count,
            resets_in_secs: remaining.as_secs().max(1),
        })
    }

    async fn current(&self, key: &str) -> RedisResult<u64> {
        let now = Instant::now();
        Ok(self
            .windows
            .get(key)
            .filter(|window| window.expires_at > now)
            .map_or(0, |window| window.count))
    }

    async fn clear(&self, key: &str) -> RedisResult<()> {
        self.windows.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_counts_within_window() {
        let store = MemoryCounterStore::new();
        let window = Duration::from_secs(60);

        assert_eq!(store.hit("k", window).await.unwrap().count, 1);
        assert_eq!(store.hit("k", window).await.unwrap().count, 2);
        assert_eq!(store.current("k").await.unwrap(), 2);
        assert_eq!(store.current("other").await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_expiry_resets_count() {
        let store = MemoryCounterStore::new();
        let window = Duration::from_secs(60);

        store.hit("k", window).await.unwrap();
        store.hit("k", window).await.unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(store.current("k").await.unwrap(), 0);

        let hit = store.hit("k", window).await.unwrap();
        assert_eq!(hit.count, 1);
        assert_eq!(hit.resets_in_secs, 60);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryCounterStore::new();
        store.hit("k", Duration::from_secs(60)).await.unwrap();
        store.clear("k").await.unwrap();
        assert!(store.is_empty());
    }
}
