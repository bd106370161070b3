//! Cache Manager Module
//!
//! Thread-safe handle over a `CacheStore` addressed by `(prefix, params)`.
//!
//! Keys and value sizes are computed before the lock is taken; only the
//! read/mutate/evict sequence runs under it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{build_key, CacheConfig, CacheStats, CacheStore};
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweep_task, SweeperHandle};

// == Cache Manager ==
/// Cloneable handle to a shared cache store.
///
/// Construct one per process and pass clones to whatever needs the cache.
#[derive(Debug, Clone)]
pub struct CacheManager {
    store: Arc<RwLock<CacheStore>>,
}

impl CacheManager {
    // == Constructor ==
    /// Creates a manager over a fresh store.
    pub fn new(config: CacheConfig) -> Self {
        Self::from_store(CacheStore::new(config))
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns the shared store, as used by the sweep task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }

    // == Set ==
    /// Stores `value` under the fingerprint of `(prefix, params)`.
    ///
    /// `ttl` overrides the store's default TTL for this entry only.
    pub async fn set<P, V>(&self, prefix: &str, params: &P, value: &V, ttl: Option<Duration>) -> Result<()>
    where
        P: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        let key = build_key(prefix, params)?;
        let value = serde_json::to_value(value)?;

        let evicted = self.store.write().await.insert(key, value, ttl);
        if evicted > 0 {
            debug!("Evicted {} entries after insert under '{}'", evicted, prefix);
        }
        Ok(())
    }

    // == Get ==
    /// Returns the cached value, or None on a miss or an expired entry.
    pub async fn get<P>(&self, prefix: &str, params: &P) -> Result<Option<Value>>
    where
        P: Serialize + ?Sized,
    {
        let key = build_key(prefix, params)?;
        let value = self.store.write().await.lookup(&key);
        Ok(value)
    }

    /// Like `get`, but only a string value counts as a hit.
    ///
    /// Any other value under the key is reported as a miss and left in place.
    pub async fn get_string<P>(&self, prefix: &str, params: &P) -> Result<Option<String>>
    where
        P: Serialize + ?Sized,
    {
        let key = build_key(prefix, params)?;
        let value = self.store.write().await.lookup_where(&key, Value::is_string);
        Ok(value.and_then(|value| match value {
            Value::String(s) => Some(s),
            _ => None,
        }))
    }

    /// Like `get`, deserializing the cached value into `T`.
    pub async fn get_as<T, P>(&self, prefix: &str, params: &P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        match self.get(prefix, params).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    // == Has ==
    /// Reports whether a live entry exists, without counting a hit or miss.
    pub async fn has<P>(&self, prefix: &str, params: &P) -> Result<bool>
    where
        P: Serialize + ?Sized,
    {
        let key = build_key(prefix, params)?;
        Ok(self.has_key(&key).await)
    }

    /// Same as `has` for a key that was already built with `build_key`.
    pub async fn has_key(&self, key: &str) -> bool {
        self.store.read().await.contains(key)
    }

    // == Delete ==
    /// Removes the entry, returning whether it was present.
    pub async fn delete<P>(&self, prefix: &str, params: &P) -> Result<bool>
    where
        P: Serialize + ?Sized,
    {
        let key = build_key(prefix, params)?;
        Ok(self.store.write().await.remove(&key))
    }

    // == Clear ==
    /// Empties the cache and resets its statistics.
    pub async fn clear(&self) {
        let removed = {
            let mut store = self.store.write().await;
            let removed = store.len();
            store.clear();
            removed
        };
        info!("Cache cleared, {} entries dropped", removed);
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Get Or Insert With ==
    /// Returns the cached value or computes, stores and returns it.
    ///
    /// The lock is released while `produce` runs, so concurrent misses on the
    /// same key may each compute; the last one to finish wins. A producer
    /// error is returned as is and nothing is stored.
    pub async fn get_or_insert_with<T, P, F, Fut, E>(
        &self,
        prefix: &str,
        params: &P,
        ttl: Option<Duration>,
        produce: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        P: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: From<CacheError>,
    {
        if let Some(cached) = self.get_as::<T, P>(prefix, params).await? {
            return Ok(cached);
        }

        let value = produce().await?;
        self.set(prefix, params, &value, ttl).await?;
        Ok(value)
    }

    // == Sweeper ==
    /// Starts the periodic TTL sweep over this cache.
    ///
    /// Must be called from within a Tokio runtime. Stop it with
    /// `SweeperHandle::shutdown`.
    pub fn spawn_sweeper(&self, interval: Duration) -> SweeperHandle {
        spawn_sweep_task(self.store(), interval)
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
