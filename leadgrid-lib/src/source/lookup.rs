//! Cached lookup data, such as lead prices per state.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio::sync::Mutex;

use super::CacheStamp;
use super::Loaded;
use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::CachedValue;
use crate::error::SourceError;

/// Fetches one piece of rarely changing reference data.
#[async_trait]
pub trait LookupSource: Send + Sync {
    /// The looked-up data.
    type Value: Clone + Send + Sync + 'static;

    /// Cache key of the data; distinct lookups need distinct keys.
    fn cache_key(&self) -> String;

    /// Fetches the data.
    async fn fetch(&self) -> Result<Self::Value, SourceError>;
}

/// A [`LookupSource`] behind a scoped cache, kept for
/// [`CacheConfig::lookup_ttl`].
pub struct CachedLookup<S: LookupSource, C> {
    source: S,
    cache: Arc<C>,
    config: CacheConfig,
    in_flight: Mutex<()>,
}

impl<S, C> CachedLookup<S, C>
where
    S: LookupSource,
    C: CacheProvider<S::Value>,
{
    pub fn new(source: S, cache: Arc<C>, config: CacheConfig) -> Self {
        Self {
            source,
            cache,
            config,
            in_flight: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the cached data, fetching it when absent or expired.
    pub async fn get(&self) -> Result<Loaded<S::Value>, SourceError> {
        let _guard = self.in_flight.lock().await;
        let key = self.source.cache_key();

        if self.config.caches_lookups() {
            if let Some(cached) = self.cache.get(&key).await {
                return Ok(Loaded::from_cache(cached));
            }
        }

        self.fetch_and_store(&key).await
    }

    /// Refetches the data regardless of the cache.
    pub async fn refresh(&self) -> Result<Loaded<S::Value>, SourceError> {
        let _guard = self.in_flight.lock().await;
        let key = self.source.cache_key();
        self.fetch_and_store(&key).await
    }

    /// Drops the cached data.
    pub async fn invalidate(&self) {
        let key = self.source.cache_key();
        debug!("Invalidating lookup '{}'", key);
        self.cache.remove(&key).await;
    }

    async fn fetch_and_store(&self, key: &str) -> Result<Loaded<S::Value>, SourceError> {
        let value = self.source.fetch().await?;
        if !self.config.caches_lookups() {
            return Ok(Loaded::fresh(value));
        }

        let entry = CachedValue::with_ttl(value.clone(), self.config.lookup_ttl);
        let stamp = CacheStamp::of(&entry);
        self.cache.set(key, entry).await;
        debug!("Cached lookup '{}'", key);
        Ok(Loaded::stored(value, stamp))
    }
}
