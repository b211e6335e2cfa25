//! Cache lifetimes

use std::time::Duration;

/// How long cached data stays valid.
///
/// Rows change as soon as someone else edits them, so they get a short
/// lifetime. Lookup data (prices per state, filter options) changes rarely.
/// A zero lifetime turns caching off for that kind of data.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use leadgrid_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_rows_ttl(Duration::from_secs(30))
///     .with_lookup_ttl(Duration::from_secs(600));
/// assert!(config.caches_rows());
/// assert!(!CacheConfig::no_cache().caches_rows());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Lifetime of fetched row collections.
    ///
    /// Default: 5 minutes
    pub rows_ttl: Duration,

    /// Lifetime of lookup data.
    ///
    /// Default: 1 hour
    pub lookup_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            rows_ttl: Duration::from_secs(5 * 60),
            lookup_ttl: Duration::from_secs(60 * 60),
        }
    }
}

impl CacheConfig {
    /// Default lifetimes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything expires immediately; nothing is served from cache.
    pub fn no_cache() -> Self {
        Self {
            rows_ttl: Duration::ZERO,
            lookup_ttl: Duration::ZERO,
        }
    }

    /// Sets the row lifetime.
    pub fn with_rows_ttl(mut self, ttl: Duration) -> Self {
        self.rows_ttl = ttl;
        self
    }

    /// Sets the lookup lifetime.
    pub fn with_lookup_ttl(mut self, ttl: Duration) -> Self {
        self.lookup_ttl = ttl;
        self
    }

    /// Returns `true` if rows are cached at all.
    pub fn caches_rows(&self) -> bool {
        !self.rows_ttl.is_zero()
    }

    /// Returns `true` if lookup data is cached at all.
    pub fn caches_lookups(&self) -> bool {
        !self.lookup_ttl.is_zero()
    }
}
