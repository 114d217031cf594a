//! Cache-aside policy for product reads and invalidation.

use super::{keys, CacheStore, CacheStoreExt};
use crate::dto::ProductResponse;
use emporium_core::{Page, ProductFilter, ProductId, ProductSort};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Product cache over an abstract store.
///
/// Writes to the cache are best-effort: a failed populate or a failed
/// invalidation sub-step is logged by the store and otherwise ignored.
/// The TTL bounds staleness whenever an invalidation is missed.
#[derive(Clone)]
pub struct ProductCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl ProductCache {
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Returns true if the underlying store is operational.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.store.is_enabled()
    }

    /// Looks up a cached product detail.
    pub async fn get_detail(&self, id: ProductId) -> Option<ProductResponse> {
        self.store.get(&keys::detail(id)).await
    }

    /// Caches a product detail.
    pub async fn put_detail(&self, product: &ProductResponse) {
        self.store
            .set(&keys::detail(product.id), product, self.ttl)
            .await;
    }

    /// Looks up a cached listing page.
    pub async fn get_list(
        &self,
        page: u32,
        page_size: u32,
        filter: &ProductFilter,
        sort: &ProductSort,
    ) -> Option<Page<ProductResponse>> {
        self.store
            .get(&keys::list(page, page_size, filter, sort))
            .await
    }

    /// Caches a listing page.
    pub async fn put_list(
        &self,
        filter: &ProductFilter,
        sort: &ProductSort,
        result: &Page<ProductResponse>,
    ) {
        let key = keys::list(result.page, result.page_size, filter, sort);
        self.store.set(&key, result, self.ttl).await;
    }

    /// Looks up a cached search page.
    pub async fn get_search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Option<Page<ProductResponse>> {
        self.store.get(&keys::search(query, page, page_size)).await
    }

    /// Caches a search page.
    pub async fn put_search(&self, query: &str, result: &Page<ProductResponse>) {
        let key = keys::search(query, result.page, result.page_size);
        self.store.set(&key, result, self.ttl).await;
    }

    /// Invalidates everything a change to one product could have made
    /// stale: its detail entry plus every listing and search page.
    ///
    /// Pages are dropped wholesale because there is no index from a
    /// product to the filtered pages that contain it.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.store.delete(&keys::detail(id)).await;
        self.store.delete_matching(keys::list_pattern()).await;
        self.store.delete_matching(keys::search_pattern()).await;
        debug!("Invalidated cache entries for product {}", id);
    }

    /// Invalidates listing and search pages only. Used after a create,
    /// which cannot have a stale detail entry yet.
    pub async fn invalidate_listings(&self) {
        self.store.delete_matching(keys::list_pattern()).await;
        self.store.delete_matching(keys::search_pattern()).await;
        debug!("Invalidated listing and search cache entries");
    }
}

impl std::fmt::Debug for ProductCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCache")
            .field("enabled", &self.is_enabled())
            .field("ttl", &self.ttl)
            .finish()
    }
}
