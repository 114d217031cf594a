//! # Emporium Repository
//!
//! Data access layer backed by PostgreSQL through SQLx.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository> / Arc<dyn UserRepository>
//! PgProductRepository / PgUserRepository
//!   ↓
//! PostgreSQL
//! ```
//!
//! All read paths exclude soft-deleted rows. Filtered listings build the
//! COUNT query and the page query from the same predicate set so totals
//! stay consistent with page contents.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use emporium_core::{
        EmporiumResult, Page, PageRequest, Product, ProductFilter, ProductId, ProductSort,
        SortField, SortOrder,
    };
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory mock repository for testing.
    struct InMemoryProductRepository {
        products: Mutex<HashMap<ProductId, Product>>,
    }

    impl InMemoryProductRepository {
        fn new() -> Self {
            Self {
                products: Mutex::new(HashMap::new()),
            }
        }

        fn with_products(products: Vec<Product>) -> Self {
            let repo = Self::new();
            for product in products {
                repo.products.lock().unwrap().insert(product.id, product);
            }
            repo
        }

        fn visible_sorted(&self, sort: &ProductSort) -> Vec<Product> {
            let mut products: Vec<Product> = self
                .products
                .lock()
                .unwrap()
                .values()
                .filter(|p| !p.is_deleted)
                .cloned()
                .collect();
            products.sort_by(|a, b| {
                let ord = match sort.sort_by {
                    SortField::Name => a.name.cmp(&b.name),
                    SortField::Price => a.price.cmp(&b.price),
                    SortField::Stock => a.stock.cmp(&b.stock),
                    SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                };
                match sort.sort_order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
            products
        }
    }

    fn paginate(products: Vec<Product>, page: PageRequest) -> Page<Product> {
        let total = products.len() as u64;
        let start = page.offset() as usize;
        let end = std::cmp::min(start + page.limit() as usize, products.len());
        let items = if start < products.len() {
            products[start..end].to_vec()
        } else {
            vec![]
        };
        Page::new(items, total, page)
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .get(&id)
                .filter(|p| !p.is_deleted)
                .cloned())
        }

        async fn find_by_sku(&self, sku: &str) -> EmporiumResult<Option<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .values()
                .find(|p| p.sku == sku && !p.is_deleted)
                .cloned())
        }

        async fn exists_by_sku(&self, sku: &str) -> EmporiumResult<bool> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .values()
                .any(|p| p.sku == sku && !p.is_deleted))
        }

        async fn find_page(
            &self,
            filter: &ProductFilter,
            sort: &ProductSort,
            page: PageRequest,
        ) -> EmporiumResult<Page<Product>> {
            let products: Vec<Product> = self
                .visible_sorted(sort)
                .into_iter()
                .filter(|p| {
                    filter
                        .name
                        .as_ref()
                        .map_or(true, |n| p.name.to_lowercase().contains(&n.to_lowercase()))
                        && filter.category.as_ref().map_or(true, |c| {
                            p.category.as_deref() == Some(c.as_str())
                        })
                        && filter.min_price.map_or(true, |min| p.price >= min)
                        && filter.max_price.map_or(true, |max| p.price <= max)
                        && (!filter.in_stock_only || p.stock > 0)
                })
                .collect();
            Ok(paginate(products, page))
        }

        async fn search(&self, term: &str, page: PageRequest) -> EmporiumResult<Page<Product>> {
            let term = term.to_lowercase();
            let products: Vec<Product> = self
                .visible_sorted(&ProductSort::default())
                .into_iter()
                .filter(|p| {
                    p.name.to_lowercase().contains(&term)
                        || p.description
                            .as_ref()
                            .is_some_and(|d| d.to_lowercase().contains(&term))
                        || p.sku.to_lowercase().contains(&term)
                })
                .collect();
            Ok(paginate(products, page))
        }

        async fn save(&self, product: &Product) -> EmporiumResult<Product> {
            self.products
                .lock()
                .unwrap()
                .insert(product.id, product.clone());
            Ok(product.clone())
        }

        async fn update(&self, product: &Product) -> EmporiumResult<Product> {
            self.products
                .lock()
                .unwrap()
                .insert(product.id, product.clone());
            Ok(product.clone())
        }

        async fn delete(&self, id: ProductId) -> EmporiumResult<bool> {
            let mut products = self.products.lock().unwrap();
            match products.get_mut(&id) {
                Some(product) if !product.is_deleted => {
                    product.soft_delete();
                    Ok(true)
                }
                _ => Ok(false),
            }
        }

        async fn count(&self) -> EmporiumResult<u64> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .values()
                .filter(|p| !p.is_deleted)
                .count() as u64)
        }
    }

    fn create_test_product(name: &str, sku: &str, price: rust_decimal::Decimal) -> Product {
        Product::new(
            name.to_string(),
            Some(format!("{} description", name)),
            price,
            10,
            Some("electronics".to_string()),
            sku.to_string(),
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryProductRepository::new();
        let product = create_test_product("Widget", "SKU-A001", dec!(19.99));
        let product_id = product.id;

        repo.save(&product).await.unwrap();

        let found = repo.find_by_id(product_id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().sku, "SKU-A001");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryProductRepository::new();
        let result = repo.find_by_id(ProductId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_by_sku() {
        let product = create_test_product("Widget", "SKU-A001", dec!(19.99));
        let repo = InMemoryProductRepository::with_products(vec![product]);

        let found = repo.find_by_sku("SKU-A001").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().name, "Widget");

        assert!(repo.find_by_sku("SKU-MISSING").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists_by_sku() {
        let product = create_test_product("Widget", "SKU-A001", dec!(19.99));
        let repo = InMemoryProductRepository::with_products(vec![product]);

        assert!(repo.exists_by_sku("SKU-A001").await.unwrap());
        assert!(!repo.exists_by_sku("SKU-MISSING").await.unwrap());
    }

    #[tokio::test]
    async fn test_soft_deleted_excluded_from_reads() {
        let product = create_test_product("Widget", "SKU-A001", dec!(19.99));
        let product_id = product.id;
        let repo = InMemoryProductRepository::with_products(vec![product]);

        assert!(repo.delete(product_id).await.unwrap());

        assert!(repo.find_by_id(product_id).await.unwrap().is_none());
        assert!(repo.find_by_sku("SKU-A001").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);

        let page = repo
            .find_page(
                &ProductFilter::default(),
                &ProductSort::default(),
                PageRequest::new(1, 10),
            )
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_product() {
        let repo = InMemoryProductRepository::new();
        assert!(!repo.delete(ProductId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_page_with_pagination() {
        let products = vec![
            create_test_product("Alpha", "SKU-A001", dec!(10.00)),
            create_test_product("Beta", "SKU-A002", dec!(20.00)),
            create_test_product("Gamma", "SKU-A003", dec!(30.00)),
        ];
        let repo = InMemoryProductRepository::with_products(products);

        let page = repo
            .find_page(
                &ProductFilter::default(),
                &ProductSort::default(),
                PageRequest::new(1, 2),
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);

        let page2 = repo
            .find_page(
                &ProductFilter::default(),
                &ProductSort::default(),
                PageRequest::new(2, 2),
            )
            .await
            .unwrap();
        assert_eq!(page2.len(), 1);
        assert_eq!(page2.total, 3);
    }

    #[tokio::test]
    async fn test_find_page_filter_by_price_range() {
        let products = vec![
            create_test_product("Cheap", "SKU-A001", dec!(5.00)),
            create_test_product("Mid", "SKU-A002", dec!(50.00)),
            create_test_product("Expensive", "SKU-A003", dec!(500.00)),
        ];
        let repo = InMemoryProductRepository::with_products(products);

        let filter = ProductFilter {
            min_price: Some(dec!(10.00)),
            max_price: Some(dec!(100.00)),
            ..Default::default()
        };

        let page = repo
            .find_page(&filter, &ProductSort::default(), PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].name, "Mid");
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_find_page_sorted_by_price_asc() {
        let products = vec![
            create_test_product("Mid", "SKU-A002", dec!(50.00)),
            create_test_product("Cheap", "SKU-A001", dec!(5.00)),
            create_test_product("Expensive", "SKU-A003", dec!(500.00)),
        ];
        let repo = InMemoryProductRepository::with_products(products);

        let sort = ProductSort::from_params("price", "asc");
        let page = repo
            .find_page(&ProductFilter::default(), &sort, PageRequest::new(1, 10))
            .await
            .unwrap();

        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cheap", "Mid", "Expensive"]);
    }

    #[tokio::test]
    async fn test_search_matches_name_description_and_sku() {
        let products = vec![
            create_test_product("Wireless Mouse", "SKU-A001", dec!(25.00)),
            create_test_product("Keyboard", "SKU-MOUSE2", dec!(45.00)),
            create_test_product("Monitor", "SKU-A003", dec!(199.00)),
        ];
        let repo = InMemoryProductRepository::with_products(products);

        let page = repo.search("mouse", PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.total, 2);

        let page = repo.search("monitor", PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.total, 1);

        let page = repo.search("missing", PageRequest::new(1, 10)).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_update_product() {
        let mut product = create_test_product("Widget", "SKU-A001", dec!(19.99));
        let product_id = product.id;
        let repo = InMemoryProductRepository::with_products(vec![product.clone()]);

        product.stock = 42;
        repo.update(&product).await.unwrap();

        let found = repo.find_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(found.stock, 42);
    }
}
