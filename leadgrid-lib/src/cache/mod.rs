//! Scoped caching layer
//!
//! Provides a `CacheProvider` trait and an in-memory implementation for
//! caching fetched rows and lookup data with TTL support. A cache instance
//! belongs to whoever created it and is passed explicitly to the code that
//! uses it; invalidation is an explicit call.

mod config;
mod memory;

pub use config::*;
pub use memory::*;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;

/// One cache entry: the value and its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue<V> {
    /// The cached data.
    pub value: V,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
    /// When the entry stops being served.
    pub expires_at: DateTime<Utc>,
}

impl<V> CachedValue<V> {
    /// Creates an entry with explicit timestamps.
    pub fn new(value: V, created_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value,
            created_at,
            expires_at,
        }
    }

    /// Creates an entry written now that lives for `ttl`.
    ///
    /// A TTL too large for chrono expires immediately.
    pub fn with_ttl(value: V, ttl: std::time::Duration) -> Self {
        let created_at = Utc::now();
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::zero());
        Self::new(value, created_at, created_at + ttl)
    }

    /// Returns `true` once the entry must no longer be served.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Time left before expiry; zero once expired.
    pub fn remaining(&self) -> TimeDelta {
        (self.expires_at - Utc::now()).max(TimeDelta::zero())
    }
}

/// Trait for cache providers.
///
/// Implementations store and retrieve cached values by string keys.
/// The provider is responsible for:
/// - Never returning expired values from `get()`
/// - Storing values with their expiration metadata
/// - Providing garbage collection for expired entries
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use leadgrid_lib::cache::{CacheProvider, CachedValue, InMemoryCache};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache = InMemoryCache::new();
///
/// cache.set("pricing:TX", CachedValue::with_ttl(25u32, Duration::from_secs(60))).await;
/// assert_eq!(cache.get("pricing:TX").await.map(|c| c.value), Some(25));
///
/// // Invalidate everything under a prefix, e.g. after a purchase.
/// assert_eq!(cache.remove_prefix("pricing:").await, 1);
/// # }
/// ```
#[async_trait]
pub trait CacheProvider<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Retrieves a cached value by key.
    ///
    /// Returns `None` if the key doesn't exist or the value has expired.
    /// Implementations must never return expired values.
    async fn get(&self, key: &str) -> Option<CachedValue<V>>;

    /// Stores a value in the cache.
    async fn set(&self, key: &str, value: CachedValue<V>);

    /// Removes a value from the cache.
    async fn remove(&self, key: &str);

    /// Removes every value whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    async fn remove_prefix(&self, prefix: &str) -> usize;

    /// Clears all values from the cache.
    async fn clear(&self);

    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    async fn gc(&self) -> usize;
}
