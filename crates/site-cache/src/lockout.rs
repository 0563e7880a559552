//! Admin login brute-force lockout

use std::time::Duration;

use crate::counter::SharedCounterStore;
use crate::pool::RedisResult;

const KEY_PREFIX: &str = "login_fail:";

/// Counts failed logins per (username, client address)
#[derive(Clone)]
pub struct LoginLockout {
    store: SharedCounterStore,
    limit: u64,
    cooloff: Duration,
}

impl std::fmt::Debug for LoginLockout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginLockout")
            .field("limit", &self.limit)
            .field("cooloff", &self.cooloff)
            .finish_non_exhaustive()
    }
}

impl LoginLockout {
    pub fn new(store: SharedCounterStore, limit: u64, cooloff: Duration) -> Self {
        Self {
            store,
            limit,
            cooloff,
        }
    }

    fn key(username: &str, client: &str) -> String {
        format!("{KEY_PREFIX}{}:{client}", username.to_lowercase())
    }

    /// Seconds of cool-off configured after the limit is reached
    pub fn cooloff_secs(&self) -> u64 {
        self.cooloff.as_secs()
    }

    pub async fn is_locked(&self, username: &str, client: &str) -> RedisResult<bool> {
        let failures = self.store.current(&Self::key(username, client)).await?;
        Ok(failures >= self.limit)
    }

    /// Record a failure; returns true once the pair is locked
    pub async fn record_failure(&self, username: &str, client: &str) -> RedisResult<bool> {
        let hit = self
            .store
            .hit(&Self::key(username, client), self.cooloff)
            .await?;
        Ok(hit.count >= self.limit)
    }

    pub async fn clear(&self, username: &str, client: &str) -> RedisResult<()> {
        self.store.clear(&Self::key(username, client)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::counter::MemoryCounterStore;

    fn lockout() -> LoginLockout {
        LoginLockout::new(
            Arc::new(MemoryCounterStore::new()),
            5,
            Duration::from_secs(3600),
        )
    }

    #[tokio::test]
    async fn test_locks_after_limit() {
        let lockout = lockout();
        for _ in 0..4 {
            assert!(!lockout.record_failure("admin", "1.1.1.1").await.unwrap());
        }
        assert!(!lockout.is_locked("admin", "1.1.1.1").await.unwrap());
        assert!(lockout.record_failure("admin", "1.1.1.1").await.unwrap());
        assert!(lockout.is_locked("Admin", "1.1.1.1").await.unwrap());

        // A different address is not affected
        assert!(!lockout.is_locked("admin", "2.2.2.2").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_on_success() {
        let lockout = lockout();
        for _ in 0..5 {
            lockout.record_failure("admin", "1.1.1.1").await.unwrap();
        }
        lockout.clear("admin", "1.1.1.1").await.unwrap();
        assert!(!lockout.is_locked("admin", "1.1.1.1").await.unwrap());
    }
}
