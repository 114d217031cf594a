//! Cache store trait for abstracted caching operations.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a raw cache lookup.
///
/// `Unavailable` keeps a backend failure distinguishable from a genuine
/// miss inside the cache layer; callers that only care about hit/miss
/// collapse it via [`CacheLookup::into_hit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// The key was present; payload is the stored JSON text.
    Hit(String),
    /// The key was absent or expired.
    Miss,
    /// The backend could not be reached; treat as a miss downstream.
    Unavailable,
}

impl CacheLookup {
    /// Returns the payload for a hit, `None` for miss or unavailability.
    #[must_use]
    pub fn into_hit(self) -> Option<String> {
        match self {
            Self::Hit(payload) => Some(payload),
            Self::Miss | Self::Unavailable => None,
        }
    }

    /// Returns true if this is a hit.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// Cache store for JSON-string payloads.
///
/// Every operation is fail-open: a backend failure surfaces as
/// `Unavailable`, `false`, or `0` rather than as an error. Callers must
/// be able to run correctly against a permanently unavailable store.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Gets a raw JSON value from the cache.
    async fn get_raw(&self, key: &str) -> CacheLookup;

    /// Sets a raw JSON value in the cache with a TTL.
    ///
    /// Returns `true` if the value was stored.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> bool;

    /// Deletes a value from the cache. Idempotent.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> bool;

    /// Deletes all keys matching a glob pattern.
    ///
    /// Returns the number of keys deleted; `0` on no match or
    /// unavailability.
    async fn delete_matching(&self, pattern: &str) -> u64;

    /// Checks if a key exists in the cache.
    async fn exists(&self, key: &str) -> bool;

    /// Removes every key from the cache.
    async fn flush_all(&self) -> bool;

    /// Checks if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    /// Gets a typed value from the cache.
    ///
    /// Malformed stored JSON is treated as a miss.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.get_raw(key).await {
            CacheLookup::Hit(json) => match serde_json::from_str(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Discarding malformed cache payload for '{}': {}", key, e);
                    None
                }
            },
            CacheLookup::Miss | CacheLookup::Unavailable => None,
        }
    }

    /// Sets a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.set_raw(key, &json, ttl).await,
            Err(e) => {
                warn!("Failed to serialize cache value for '{}': {}", key, e);
                false
            }
        }
    }
}

// Blanket implementation for all CacheStore implementations
impl<T: CacheStore + ?Sized> CacheStoreExt for T {}
