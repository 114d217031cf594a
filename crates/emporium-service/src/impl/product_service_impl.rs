//! Product service implementation with cache-aside reads.

use crate::cache::ProductCache;
use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::product_service::ProductService;
use async_trait::async_trait;
use emporium_core::{
    EmporiumError, EmporiumResult, Page, PageRequest, ProductFilter, ProductId, ProductSort,
    ValidateExt,
};
use emporium_repository::ProductRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Default product service.
///
/// Reads consult the cache first and fall back to the repository; the
/// repository result is written back to the cache best-effort. Mutations
/// hit the repository first and invalidate afterwards, so a reader never
/// observes a cache entry for data the store has not yet accepted.
pub struct ProductServiceImpl<R: ProductRepository> {
    repository: Arc<R>,
    cache: ProductCache,
}

impl<R: ProductRepository> ProductServiceImpl<R> {
    #[must_use]
    pub fn new(repository: Arc<R>, cache: ProductCache) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl<R: ProductRepository> ProductService for ProductServiceImpl<R> {
    async fn get_product(&self, id: ProductId) -> EmporiumResult<ProductResponse> {
        if let Some(cached) = self.cache.get_detail(id).await {
            return Ok(cached);
        }

        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("Product", id))?;

        let response = ProductResponse::from(product);
        self.cache.put_detail(&response).await;
        Ok(response)
    }

    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> EmporiumResult<Page<ProductResponse>> {
        if let Some(cached) = self
            .cache
            .get_list(page.page, page.page_size, &filter, &sort)
            .await
        {
            return Ok(cached);
        }

        let result = self
            .repository
            .find_page(&filter, &sort, page)
            .await?
            .map(ProductResponse::from);

        self.cache.put_list(&filter, &sort, &result).await;
        Ok(result)
    }

    async fn search_products(
        &self,
        query: &str,
        page: PageRequest,
    ) -> EmporiumResult<Page<ProductResponse>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(EmporiumError::validation("Search query must not be empty"));
        }

        if let Some(cached) = self.cache.get_search(query, page.page, page.page_size).await {
            return Ok(cached);
        }

        let result = self
            .repository
            .search(query, page)
            .await?
            .map(ProductResponse::from);

        self.cache.put_search(query, &result).await;
        Ok(result)
    }

    async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> EmporiumResult<ProductResponse> {
        request.validate_request()?;

        if self.repository.exists_by_sku(&request.sku).await? {
            return Err(EmporiumError::conflict(format!(
                "Product with SKU '{}' already exists",
                request.sku
            )));
        }

        let saved = self.repository.save(&request.into_product()).await?;
        info!("Created product {} (sku {})", saved.id, saved.sku);

        self.cache.invalidate_listings().await;
        Ok(saved.into())
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> EmporiumResult<ProductResponse> {
        request.validate_request()?;
        if request.is_empty() {
            return Err(EmporiumError::validation("No fields to update"));
        }

        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("Product", id))?;

        if let Some(new_sku) = &request.sku {
            if *new_sku != product.sku && self.repository.exists_by_sku(new_sku).await? {
                return Err(EmporiumError::conflict(format!(
                    "Product with SKU '{}' already exists",
                    new_sku
                )));
            }
        }

        product.apply_patch(request.into_patch());
        let updated = self.repository.update(&product).await?;
        debug!("Updated product {}", updated.id);

        self.cache.invalidate_product(id).await;
        Ok(updated.into())
    }

    async fn delete_product(&self, id: ProductId) -> EmporiumResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(EmporiumError::not_found("Product", id));
        }
        info!("Deleted product {}", id);

        self.cache.invalidate_product(id).await;
        Ok(())
    }
}
