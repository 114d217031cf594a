//! Product service trait.

use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use async_trait::async_trait;
use emporium_core::{EmporiumResult, Page, PageRequest, ProductFilter, ProductId, ProductSort};

/// Catalog operations over products.
///
/// Reads go through the cache; every mutation invalidates the entries it
/// could have made stale before returning.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Fetches a single product by ID.
    async fn get_product(&self, id: ProductId) -> EmporiumResult<ProductResponse>;

    /// Lists products with filtering, sorting and pagination.
    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> EmporiumResult<Page<ProductResponse>>;

    /// Searches products by a free-text term over name, description and
    /// SKU.
    async fn search_products(
        &self,
        query: &str,
        page: PageRequest,
    ) -> EmporiumResult<Page<ProductResponse>>;

    /// Creates a new product.
    async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> EmporiumResult<ProductResponse>;

    /// Partially updates an existing product.
    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> EmporiumResult<ProductResponse>;

    /// Soft-deletes a product.
    async fn delete_product(&self, id: ProductId) -> EmporiumResult<()>;
}
