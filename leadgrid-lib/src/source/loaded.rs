//! Loaded rows and where they came from

use chrono::DateTime;
use chrono::Utc;

use crate::cache::CachedValue;

/// Data returned by a [`CachedRowSource`](super::CachedRowSource), tagged
/// with its cache status so a UI can show "updated 2 minutes ago".
///
/// # Example
///
/// ```
/// use leadgrid_lib::source::{CacheStatus, Loaded};
///
/// let loaded = Loaded::fresh(vec![1, 2, 3]);
/// assert_eq!(loaded.cache, CacheStatus::None);
/// assert!(!loaded.is_cached());
/// assert_eq!(loaded.map(|rows| rows.len()).data, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// The loaded data.
    pub data: T,
    /// Whether the data came from the cache.
    pub cache: CacheStatus,
}

impl<T> Loaded<T> {
    /// Data fetched with no cache involved.
    pub fn fresh(data: T) -> Self {
        Self {
            data,
            cache: CacheStatus::None,
        }
    }

    /// Data just fetched and stored under `stamp`.
    pub fn stored(data: T, stamp: CacheStamp) -> Self {
        Self {
            data,
            cache: CacheStatus::Miss(stamp),
        }
    }

    /// Data served from a cache entry.
    pub fn from_cache(entry: CachedValue<T>) -> Self {
        let stamp = CacheStamp::of(&entry);
        Self {
            data: entry.value,
            cache: CacheStatus::Hit(stamp),
        }
    }

    /// Returns `true` if the data came from the cache.
    pub fn is_cached(&self) -> bool {
        self.cache.is_hit()
    }

    /// When the data was cached, if it was.
    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.cache.stamp().map(|stamp| stamp.cached_at)
    }

    /// When the cached copy expires, if there is one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.cache.stamp().map(|stamp| stamp.expires_at)
    }

    /// Consumes the result and returns the data.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Maps the data, keeping the cache status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            data: f(self.data),
            cache: self.cache,
        }
    }
}

/// Lifetime of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStamp {
    /// When the entry was written.
    pub cached_at: DateTime<Utc>,
    /// When the entry stops being served.
    pub expires_at: DateTime<Utc>,
}

impl CacheStamp {
    /// Stamp of a cache entry.
    pub fn of<V>(entry: &CachedValue<V>) -> Self {
        Self {
            cached_at: entry.created_at,
            expires_at: entry.expires_at,
        }
    }
}

/// Where loaded data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No cache involved.
    None,
    /// Freshly fetched, and now cached.
    Miss(CacheStamp),
    /// Served from the cache.
    Hit(CacheStamp),
}

impl CacheStatus {
    /// Returns `true` for a cache hit.
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// Returns `true` for a cache miss.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss(_))
    }

    /// Returns `true` if no cache was involved.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Cache entry lifetime, for hits and misses.
    pub fn stamp(&self) -> Option<CacheStamp> {
        match self {
            Self::None => None,
            Self::Miss(stamp) | Self::Hit(stamp) => Some(*stamp),
        }
    }
}
