//! Caching infrastructure for the service layer.
//!
//! A fail-open cache client over Redis plus the cache-aside policy that
//! decides which product reads are cached and what each mutation
//! invalidates.

pub mod keys;
mod product_cache;
mod redis_store;
mod store;

pub use product_cache::ProductCache;
pub use redis_store::{RedisCacheStore, DEFAULT_TTL};
pub use store::{CacheLookup, CacheStore, CacheStoreExt};
