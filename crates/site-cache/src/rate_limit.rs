//! Fixed-window rate limiting

use std::time::Duration;

use crate::counter::SharedCounterStore;

/// Key prefix for rate-limit counters
const KEY_PREFIX: &str = "ratelimit:";

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub count: u64,
    pub limit: u64,
    /// Seconds until the window closes
    pub retry_after_secs: u64,
}

/// Per-client request ceiling over a fixed window
#[derive(Clone)]
pub struct RateLimiter {
    store: SharedCounterStore,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}

impl RateLimiter {
    pub fn new(store: SharedCounterStore) -> Self {
        Self { store }
    }

    /// Counter key for a route class and client address
    pub fn key(class: &str, client: &str) -> String {
        format!("{KEY_PREFIX}{class}:{client}")
    }

    /// Count this request and decide whether it is within `limit`.
    ///
    /// A failing counter store lets the request through.
    pub async fn check(
        &self,
        class: &str,
        client: &str,
        limit: u64,
        window: Duration,
    ) -> RateDecision {
        let key = Self::key(class, client);
        match self.store.hit(&key, window).await {
            Ok(hit) => RateDecision {
                allowed: hit.count <= limit,
                count: hit.count,
                limit,
                retry_after_secs: hit.resets_in_secs,
            },
            Err(e) => {
                tracing::error!(error = %e, key = %key, "Rate-limit counter unavailable");
                RateDecision {
                    allowed: true,
                    count: 0,
                    limit,
                    retry_after_secs: 0,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::counter::MemoryCounterStore;

    #[test]
    fn test_key_format() {
        assert_eq!(RateLimiter::key("contact", "10.0.0.1"), "ratelimit:contact:10.0.0.1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ceiling_then_next_window() {
        let limiter = RateLimiter::new(Arc::new(MemoryCounterStore::new()));
        let window = Duration::from_secs(60);

        for _ in 0..3 {
            assert!(limiter.check("general", "1.2.3.4", 3, window).await.allowed);
        }
        let rejected = limiter.check("general", "1.2.3.4", 3, window).await;
        assert!(!rejected.allowed);
        assert_eq!(rejected.count, 4);

        // Other clients and classes are counted separately
        assert!(limiter.check("general", "5.6.7.8", 3, window).await.allowed);
        assert!(limiter.check("contact", "1.2.3.4", 3, window).await.allowed);

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(limiter.check("general", "1.2.3.4", 3, window).await.allowed);
    }
}
