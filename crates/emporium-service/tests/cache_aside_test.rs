//! Integration tests for cache-aside reads and invalidation, using an
//! in-memory cache store and a call-counting repository.

use async_trait::async_trait;
use emporium_core::{
    EmporiumError, EmporiumResult, Page, PageRequest, Product, ProductFilter, ProductId,
    ProductSort, SortField, SortOrder,
};
use emporium_repository::ProductRepository;
use emporium_service::cache::{CacheLookup, CacheStore, ProductCache};
use emporium_service::dto::{CreateProductRequest, UpdateProductRequest};
use emporium_service::{ProductService, ProductServiceImpl};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory cache store backed by a HashMap. TTLs are accepted and
/// ignored; expiry is not simulated.
#[derive(Default)]
struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCacheStore {
    fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> CacheLookup {
        match self.entries.lock().unwrap().get(key) {
            Some(value) => CacheLookup::Hit(value.clone()),
            None => CacheLookup::Miss,
        }
    }

    async fn set_raw(&self, key: &str, value: &str, _ttl: Duration) -> bool {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        true
    }

    async fn delete(&self, key: &str) -> bool {
        self.entries.lock().unwrap().remove(key).is_some()
    }

    async fn delete_matching(&self, pattern: &str) -> u64 {
        let prefix = pattern.trim_end_matches('*');
        let mut entries = self.entries.lock().unwrap();
        let matching: Vec<String> = entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        for key in &matching {
            entries.remove(key);
        }
        matching.len() as u64
    }

    async fn exists(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    async fn flush_all(&self) -> bool {
        self.entries.lock().unwrap().clear();
        true
    }
}

/// Cache store that reports itself unavailable for every operation.
struct UnavailableCacheStore;

#[async_trait]
impl CacheStore for UnavailableCacheStore {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn get_raw(&self, _key: &str) -> CacheLookup {
        CacheLookup::Unavailable
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> bool {
        false
    }

    async fn delete(&self, _key: &str) -> bool {
        false
    }

    async fn delete_matching(&self, _pattern: &str) -> u64 {
        0
    }

    async fn exists(&self, _key: &str) -> bool {
        false
    }

    async fn flush_all(&self) -> bool {
        false
    }
}

/// In-memory product repository that counts read operations, so tests
/// can assert whether a read was served from the cache.
#[derive(Default)]
struct CountingProductRepository {
    products: Mutex<Vec<Product>>,
    reads: AtomicUsize,
}

impl CountingProductRepository {
    fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn visible(&self) -> Vec<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !p.is_deleted)
            .cloned()
            .collect()
    }

    fn matches(product: &Product, filter: &ProductFilter) -> bool {
        if let Some(name) = &filter.name {
            if !product.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = &filter.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(min) = filter.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = filter.max_price {
            if product.price > max {
                return false;
            }
        }
        if filter.in_stock_only && product.stock <= 0 {
            return false;
        }
        true
    }

    fn sort(products: &mut [Product], sort: &ProductSort) {
        products.sort_by(|a, b| {
            let ordering = match sort.sort_by {
                SortField::Name => a.name.cmp(&b.name),
                SortField::Price => a.price.cmp(&b.price),
                SortField::Stock => a.stock.cmp(&b.stock),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match sort.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    fn paginate(products: Vec<Product>, page: PageRequest) -> Page<Product> {
        let total = products.len() as u64;
        let items = products
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Page::new(items, total, page)
    }
}

#[async_trait]
impl ProductRepository for CountingProductRepository {
    async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.visible().into_iter().find(|p| p.id == id))
    }

    async fn find_by_sku(&self, sku: &str) -> EmporiumResult<Option<Product>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.visible().into_iter().find(|p| p.sku == sku))
    }

    async fn exists_by_sku(&self, sku: &str) -> EmporiumResult<bool> {
        Ok(self.visible().iter().any(|p| p.sku == sku))
    }

    async fn find_page(
        &self,
        filter: &ProductFilter,
        sort: &ProductSort,
        page: PageRequest,
    ) -> EmporiumResult<Page<Product>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut products: Vec<Product> = self
            .visible()
            .into_iter()
            .filter(|p| Self::matches(p, filter))
            .collect();
        Self::sort(&mut products, sort);
        Ok(Self::paginate(products, page))
    }

    async fn search(&self, term: &str, page: PageRequest) -> EmporiumResult<Page<Product>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let needle = term.to_lowercase();
        let mut products: Vec<Product> = self
            .visible()
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.sku.to_lowercase().contains(&needle)
                    || p.description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::paginate(products, page))
    }

    async fn save(&self, product: &Product) -> EmporiumResult<Product> {
        self.products.lock().unwrap().push(product.clone());
        Ok(product.clone())
    }

    async fn update(&self, product: &Product) -> EmporiumResult<Product> {
        let mut products = self.products.lock().unwrap();
        let existing = products
            .iter_mut()
            .find(|p| p.id == product.id && !p.is_deleted)
            .ok_or_else(|| EmporiumError::not_found("Product", product.id))?;
        *existing = product.clone();
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> EmporiumResult<bool> {
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == id && !p.is_deleted) {
            Some(product) => {
                product.soft_delete();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> EmporiumResult<u64> {
        Ok(self.visible().len() as u64)
    }
}

fn service_with(
    store: Arc<dyn CacheStore>,
) -> (
    ProductServiceImpl<CountingProductRepository>,
    Arc<CountingProductRepository>,
) {
    let repository = Arc::new(CountingProductRepository::default());
    let cache = ProductCache::new(store, Duration::from_secs(300));
    (
        ProductServiceImpl::new(Arc::clone(&repository), cache),
        repository,
    )
}

fn create_request(name: &str, sku: &str, price: rust_decimal::Decimal) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        price,
        stock: 10,
        category: Some("Electronics".to_string()),
        sku: sku.to_string(),
    }
}

#[tokio::test]
async fn detail_read_is_served_from_cache_on_second_lookup() {
    let (service, repository) = service_with(Arc::new(InMemoryCacheStore::default()));

    let created = service
        .create_product(create_request("Wireless Mouse", "SKU-A001", dec!(19.99)))
        .await
        .unwrap();

    let first = service.get_product(created.id).await.unwrap();
    let reads_after_first = repository.read_count();

    let second = service.get_product(created.id).await.unwrap();
    assert_eq!(repository.read_count(), reads_after_first);
    assert_eq!(first, second);
}

#[tokio::test]
async fn cached_page_is_byte_identical_to_store_result() {
    let store = Arc::new(InMemoryCacheStore::default());
    let (service, _) = service_with(store.clone());

    service
        .create_product(create_request("Keyboard", "SKU-K001", dec!(49.99)))
        .await
        .unwrap();

    let from_store = service
        .list_products(
            ProductFilter::default(),
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();

    let payload = store
        .raw("products:list:1:10:all")
        .expect("listing page should be cached");
    assert_eq!(payload, serde_json::to_string(&from_store).unwrap());

    let from_cache = service
        .list_products(
            ProductFilter::default(),
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();
    assert_eq!(from_store, from_cache);
}

#[tokio::test]
async fn create_invalidates_listing_and_search_pages() {
    let store = Arc::new(InMemoryCacheStore::default());
    let (service, _) = service_with(store.clone());

    let first = service
        .create_product(create_request("Monitor", "SKU-M001", dec!(199.00)))
        .await
        .unwrap();

    // Warm every query shape.
    service.get_product(first.id).await.unwrap();
    service
        .list_products(
            ProductFilter::default(),
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();
    service
        .search_products("monitor", PageRequest::first())
        .await
        .unwrap();
    assert_eq!(store.keys().len(), 3);

    service
        .create_product(create_request("Monitor Stand", "SKU-M002", dec!(29.00)))
        .await
        .unwrap();

    // Listing and search pages are gone; the detail entry survives a
    // create, since the new product cannot be stale in it.
    let remaining = store.keys();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].starts_with("products:detail:"));
}

#[tokio::test]
async fn update_invalidates_detail_and_all_pages() {
    let store = Arc::new(InMemoryCacheStore::default());
    let (service, _) = service_with(store.clone());

    let created = service
        .create_product(create_request("Webcam", "SKU-W001", dec!(59.00)))
        .await
        .unwrap();

    service.get_product(created.id).await.unwrap();
    service
        .list_products(
            ProductFilter::default(),
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();
    service
        .search_products("webcam", PageRequest::first())
        .await
        .unwrap();
    assert!(!store.keys().is_empty());

    service
        .update_product(
            created.id,
            UpdateProductRequest {
                price: Some(dec!(64.00)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(store.keys().is_empty());

    // The next read repopulates with the new price.
    let fresh = service.get_product(created.id).await.unwrap();
    assert_eq!(fresh.price, dec!(64.00));
}

#[tokio::test]
async fn service_works_with_unavailable_cache() {
    let (service, repository) = service_with(Arc::new(UnavailableCacheStore));

    let created = service
        .create_product(create_request("Headset", "SKU-H001", dec!(89.00)))
        .await
        .unwrap();

    let first = service.get_product(created.id).await.unwrap();
    let reads_after_first = repository.read_count();
    let second = service.get_product(created.id).await.unwrap();

    // Every read hits the store when the cache is down.
    assert_eq!(repository.read_count(), reads_after_first + 1);
    assert_eq!(first, second);

    let page = service
        .list_products(
            ProductFilter::default(),
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn duplicate_sku_is_rejected() {
    let (service, _) = service_with(Arc::new(InMemoryCacheStore::default()));

    service
        .create_product(create_request("Mouse", "SKU-A001", dec!(19.99)))
        .await
        .unwrap();

    let result = service
        .create_product(create_request("Other Mouse", "SKU-A001", dec!(24.99)))
        .await;
    assert!(matches!(result, Err(EmporiumError::Conflict(_))));
}

#[tokio::test]
async fn distinct_filters_use_distinct_cache_entries() {
    let store = Arc::new(InMemoryCacheStore::default());
    let (service, _) = service_with(store.clone());

    let mut request = create_request("Paperback", "SKU-B001", dec!(9.99));
    request.category = Some("Books".to_string());
    service.create_product(request).await.unwrap();
    service
        .create_product(create_request("Mouse", "SKU-A002", dec!(19.99)))
        .await
        .unwrap();

    let books = service
        .list_products(
            ProductFilter {
                category: Some("Books".to_string()),
                ..Default::default()
            },
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();
    let all = service
        .list_products(
            ProductFilter::default(),
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();

    assert_eq!(books.total, 1);
    assert_eq!(all.total, 2);

    let list_keys: Vec<String> = store
        .keys()
        .into_iter()
        .filter(|k| k.starts_with("products:list:"))
        .collect();
    assert_eq!(list_keys.len(), 2);
}

#[tokio::test]
async fn crud_lifecycle_with_cache() {
    let (service, _) = service_with(Arc::new(InMemoryCacheStore::default()));

    let created = service
        .create_product(create_request("Wireless Mouse", "SKU-A001", dec!(19.99)))
        .await
        .unwrap();
    assert_eq!(created.price, dec!(19.99));

    // Visible in an unfiltered listing, invisible under a non-matching
    // category filter.
    let all = service
        .list_products(
            ProductFilter::default(),
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();
    assert!(all.items.iter().any(|p| p.id == created.id));

    let books = service
        .list_products(
            ProductFilter {
                category: Some("Books".to_string()),
                ..Default::default()
            },
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();
    assert!(books.items.is_empty());

    // A price update is visible on the next read.
    let updated = service
        .update_product(
            created.id,
            UpdateProductRequest {
                price: Some(dec!(25.00)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, dec!(25.00));
    assert_eq!(
        service.get_product(created.id).await.unwrap().price,
        dec!(25.00)
    );

    // After deletion every query shape stops returning the product.
    service.delete_product(created.id).await.unwrap();
    assert!(matches!(
        service.get_product(created.id).await,
        Err(EmporiumError::NotFound { .. })
    ));
    let after = service
        .list_products(
            ProductFilter::default(),
            ProductSort::default(),
            PageRequest::first(),
        )
        .await
        .unwrap();
    assert!(after.items.is_empty());
    let searched = service
        .search_products("SKU-A001", PageRequest::first())
        .await
        .unwrap();
    assert!(searched.items.is_empty());

    // Deleting twice reports not found.
    assert!(matches!(
        service.delete_product(created.id).await,
        Err(EmporiumError::NotFound { .. })
    ));
}

#[tokio::test]
async fn empty_search_query_is_rejected() {
    let (service, _) = service_with(Arc::new(InMemoryCacheStore::default()));
    let result = service.search_products("   ", PageRequest::first()).await;
    assert!(matches!(result, Err(EmporiumError::Validation(_))));
}
