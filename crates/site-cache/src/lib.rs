//! # site-cache
//!
//! Redis connection pool and the shared counters behind rate limiting and
//! admin login lockout.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Counter Store**: Atomic increment-with-expiry, in Redis or in process
//! - **Rate Limiter**: Fixed-window request ceilings per client and route class
//! - **Login Lockout**: Failure counting per (username, address) with a cool-off
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use site_cache::{RateLimiter, RedisCounterStore, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let limiter = RateLimiter::new(Arc::new(RedisCounterStore::new(pool)));
//!
//! let decision = limiter.check("general", "203.0.113.7", 100, Duration::from_secs(60)).await;
//! if !decision.allowed {
//!     // respond 429
//! }
//! ```

pub mod counter;
pub mod lockout;
pub mod pool;
pub mod rate_limit;

// Re-export pool types
pub use pool::{
    RedisPool, RedisPoolConfig, RedisPoolError, RedisResult,
};

// Re-export counter types
pub use counter::{CounterStore, Hit, MemoryCounterStore, RedisCounterStore, SharedCounterStore};

pub use lockout::LoginLockout;
pub use rate_limit::{RateDecision, RateLimiter};
