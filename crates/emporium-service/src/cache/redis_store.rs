//! Redis-based cache store implementation.

use super::{CacheLookup, CacheStore};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool, PoolConfig, Runtime};
use emporium_config::RedisConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Redis-based cache store.
///
/// Connection failures at construction or at any operation degrade the
/// store to a no-op; they never propagate to callers.
#[derive(Clone)]
pub struct RedisCacheStore {
    pool: Option<Arc<Pool>>,
}

impl RedisCacheStore {
    /// Connects to Redis.
    ///
    /// Returns a disabled store when caching is turned off in the
    /// configuration or when the backend cannot be reached.
    pub async fn connect(config: &RedisConfig) -> Self {
        if !config.enabled {
            info!("Cache disabled by configuration");
            return Self::disabled();
        }

        let mut pool_config = deadpool_redis::Config::from_url(&config.url);
        pool_config.pool = Some(PoolConfig::new(config.pool_size as usize));

        let pool = match pool_config.create_pool(Some(Runtime::Tokio1)) {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Failed to create Redis pool, running without cache: {}", e);
                return Self::disabled();
            }
        };

        match pool.get().await {
            Ok(mut conn) => {
                let ping: Result<String, _> = deadpool_redis::redis::cmd("PING")
                    .query_async(&mut conn)
                    .await;
                match ping {
                    Ok(_) => {
                        info!("Redis cache connected: {}", config.url);
                        Self {
                            pool: Some(Arc::new(pool)),
                        }
                    }
                    Err(e) => {
                        warn!("Redis ping failed, running without cache: {}", e);
                        Self::disabled()
                    }
                }
            }
            Err(e) => {
                warn!("Redis unreachable, running without cache: {}", e);
                Self::disabled()
            }
        }
    }

    /// Creates a no-op cache store (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Closes the connection pool.
    pub fn disconnect(&self) {
        if let Some(pool) = &self.pool {
            info!("Closing Redis connection pool");
            pool.close();
        }
    }

    /// Gets a connection from the pool.
    async fn get_conn(&self) -> Option<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => match pool.get().await {
                Ok(conn) => Some(conn),
                Err(e) => {
                    warn!("Failed to get Redis connection: {}", e);
                    None
                }
            },
            None => None,
        }
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> CacheLookup {
        if !self.is_enabled() {
            return CacheLookup::Unavailable;
        }

        let Some(mut conn) = self.get_conn().await else {
            return CacheLookup::Unavailable;
        };

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("Cache hit for key '{}'", key);
                CacheLookup::Hit(value)
            }
            Ok(None) => {
                debug!("Cache miss for key '{}'", key);
                CacheLookup::Miss
            }
            Err(e) => {
                warn!("Failed to get key '{}': {}", key, e);
                CacheLookup::Unavailable
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };
        let ttl_secs = ttl.as_secs().max(1);

        match conn.set_ex::<_, _, ()>(key, value, ttl_secs).await {
            Ok(()) => {
                debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
                true
            }
            Err(e) => {
                warn!("Failed to set key '{}': {}", key, e);
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        match conn.del::<_, i64>(key).await {
            Ok(deleted) => {
                debug!("Deleted key '{}': {}", key, deleted > 0);
                deleted > 0
            }
            Err(e) => {
                warn!("Failed to delete key '{}': {}", key, e);
                false
            }
        }
    }

    async fn delete_matching(&self, pattern: &str) -> u64 {
        let Some(mut conn) = self.get_conn().await else {
            return 0;
        };

        // KEYS is acceptable at this key-space size; SCAN would be the
        // upgrade path for much larger namespaces.
        let keys: Vec<String> = match deadpool_redis::redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut conn)
            .await
        {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Failed to scan keys for pattern '{}': {}", pattern, e);
                return 0;
            }
        };

        if keys.is_empty() {
            return 0;
        }

        match conn.del::<_, i64>(&keys).await {
            Ok(deleted) => {
                debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
                deleted as u64
            }
            Err(e) => {
                warn!("Failed to delete keys for pattern '{}': {}", pattern, e);
                0
            }
        }
    }

    async fn exists(&self, key: &str) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        match conn.exists::<_, bool>(key).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!("Failed to check key '{}': {}", key, e);
                false
            }
        }
    }

    async fn flush_all(&self) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        match deadpool_redis::redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
        {
            Ok(()) => {
                info!("Flushed cache");
                true
            }
            Err(e) => {
                warn!("Failed to flush cache: {}", e);
                false
            }
        }
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_store_is_fail_open() {
        let store = RedisCacheStore::disabled();
        assert!(!store.is_enabled());

        assert_eq!(store.get_raw("any").await, CacheLookup::Unavailable);
        assert!(!store.set_raw("any", "{}", DEFAULT_TTL).await);
        assert!(!store.delete("any").await);
        assert_eq!(store.delete_matching("any:*").await, 0);
        assert!(!store.exists("any").await);
        assert!(!store.flush_all().await);
    }
}
