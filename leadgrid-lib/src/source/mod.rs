//! Row sources: fetching table rows from a backend, optionally cached.
//!
//! The table controller never performs I/O. A [`RowSource`] fetches the rows,
//! a [`CachedRowSource`] puts a scoped cache in front of it, and the caller
//! hands the result to
//! [`TableController::set_rows`](crate::table::TableController::set_rows).

mod loaded;
mod lookup;

pub use loaded::*;
pub use lookup::*;

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::CachedValue;
use crate::error::SourceError;
use crate::model::Record;

/// Fetches the rows of one table from a backend.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use leadgrid_lib::error::SourceError;
/// use leadgrid_lib::model::Record;
/// use leadgrid_lib::source::RowSource;
///
/// struct OrdersSource {
///     customer_id: i64,
/// }
///
/// #[async_trait]
/// impl RowSource for OrdersSource {
///     type Row = Record;
///
///     fn cache_key(&self) -> String {
///         format!("orders:{}", self.customer_id)
///     }
///
///     async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
///         Ok(vec![Record::new(1).set("status", "paid")])
///     }
/// }
/// ```
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Row type produced by this source.
    type Row: Clone + Send + Sync + 'static;

    /// Cache key of the rows this source returns.
    ///
    /// Sources returning different rows must use different keys.
    fn cache_key(&self) -> String;

    /// Fetches the full row collection.
    async fn fetch(&self) -> Result<Vec<Self::Row>, SourceError>;
}

/// A [`RowSource`] behind a scoped cache.
///
/// Concurrent loads are serialized, so two overlapping loads never race to
/// write different results into the table.
pub struct CachedRowSource<S: RowSource, C> {
    source: S,
    cache: Option<Arc<C>>,
    config: CacheConfig,
    in_flight: Mutex<()>,
}

impl<S, C> CachedRowSource<S, C>
where
    S: RowSource,
    C: CacheProvider<Vec<S::Row>>,
{
    /// Wraps a source with a cache.
    pub fn new(source: S, cache: Arc<C>, config: CacheConfig) -> Self {
        Self {
            source,
            cache: Some(cache),
            config,
            in_flight: Mutex::new(()),
        }
    }

    /// Wraps a source without caching; every load fetches.
    pub fn uncached(source: S) -> Self {
        Self {
            source,
            cache: None,
            config: CacheConfig::no_cache(),
            in_flight: Mutex::new(()),
        }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads the rows, from the cache when a live entry exists.
    pub async fn load(&self) -> Result<Loaded<Vec<S::Row>>, SourceError> {
        let _guard = self.in_flight.lock().await;
        let key = self.source.cache_key();

        if let Some(cache) = self.cache() {
            if let Some(cached) = cache.get(&key).await {
                debug!("Cache hit for '{}'", key);
                return Ok(Loaded::from_cache(cached));
            }
        }

        self.fetch_and_store(&key).await
    }

    /// Fetches the rows, ignoring any cached entry, and caches the result.
    pub async fn refresh(&self) -> Result<Loaded<Vec<S::Row>>, SourceError> {
        let _guard = self.in_flight.lock().await;
        let key = self.source.cache_key();
        self.fetch_and_store(&key).await
    }

    /// Drops the cached rows of this source.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            let key = self.source.cache_key();
            debug!("Invalidating '{}'", key);
            cache.remove(&key).await;
        }
    }

    fn cache(&self) -> Option<&C> {
        match &self.cache {
            Some(cache) if self.config.caches_rows() => Some(cache),
            _ => None,
        }
    }

    async fn fetch_and_store(&self, key: &str) -> Result<Loaded<Vec<S::Row>>, SourceError> {
        let rows = self.source.fetch().await?;
        debug!("Fetched {} rows for '{}'", rows.len(), key);

        let Some(cache) = self.cache() else {
            return Ok(Loaded::fresh(rows));
        };

        let entry = CachedValue::with_ttl(rows.clone(), self.config.rows_ttl);
        let stamp = CacheStamp::of(&entry);
        cache.set(key, entry).await;
        Ok(Loaded::stored(rows, stamp))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RowsBody {
    Rows(Vec<Record>),
    Envelope { data: Vec<Record> },
}

/// Decodes a JSON response body into records.
///
/// Accepts a bare array of objects or an object wrapping the array in a
/// `data` field.
///
/// # Example
///
/// ```
/// use leadgrid_lib::source::decode_records;
///
/// let rows = decode_records(r#"{"data": [{"id": 1, "name": "Jane"}]}"#).unwrap();
/// assert_eq!(rows.len(), 1);
/// ```
pub fn decode_records(body: &str) -> Result<Vec<Record>, SourceError> {
    let rows = match serde_json::from_str(body)? {
        RowsBody::Rows(rows) => rows,
        RowsBody::Envelope { data } => data,
    };
    Ok(rows)
}
