//! DashMap-backed cache

use async_trait::async_trait;
use dashmap::DashMap;

use super::CacheProvider;
use super::CachedValue;

/// Process-local cache on a concurrent hash map.
///
/// Expired entries are dropped lazily on `get`, or in bulk by `gc`.
///
/// # Example
///
/// ```
/// use leadgrid_lib::cache::InMemoryCache;
/// use leadgrid_lib::model::Record;
///
/// let cache: InMemoryCache<Vec<Record>> = InMemoryCache::new();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug)]
pub struct InMemoryCache<V> {
    entries: DashMap<String, CachedValue<V>>,
}

impl<V> Default for InMemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> InMemoryCache<V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Creates an empty cache with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Removes the entries matching `doomed`; returns how many went.
    fn purge(&self, mut doomed: impl FnMut(&str, &CachedValue<V>) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, entry| !doomed(key, entry));
        before.saturating_sub(self.entries.len())
    }
}

#[async_trait]
impl<V> CacheProvider<V> for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<CachedValue<V>> {
        // The shard guard must be released before removing.
        let live = self
            .entries
            .get(key)
            .map(|entry| (!entry.is_expired()).then(|| entry.value().clone()))?;
        if live.is_none() {
            self.entries.remove_if(key, |_, entry| entry.is_expired());
        }
        live
    }

    async fn set(&self, key: &str, value: CachedValue<V>) {
        self.entries.insert(key.to_owned(), value);
    }

    async fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    async fn remove_prefix(&self, prefix: &str) -> usize {
        self.purge(|key, _| key.starts_with(prefix))
    }

    async fn clear(&self) {
        self.entries.clear();
    }

    async fn gc(&self) -> usize {
        self.purge(|_, entry| entry.is_expired())
    }
}
