//! Repository trait definitions.

use async_trait::async_trait;
use emporium_core::{
    EmporiumResult, Page, PageRequest, Product, ProductFilter, ProductId, ProductSort, User,
    UserId,
};

/// Product repository trait.
///
/// All read operations exclude soft-deleted rows.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>>;

    /// Finds a product by SKU.
    async fn find_by_sku(&self, sku: &str) -> EmporiumResult<Option<Product>>;

    /// Checks if a SKU exists.
    async fn exists_by_sku(&self, sku: &str) -> EmporiumResult<bool>;

    /// Finds a page of products matching the filter, ordered by the sort.
    async fn find_page(
        &self,
        filter: &ProductFilter,
        sort: &ProductSort,
        page: PageRequest,
    ) -> EmporiumResult<Page<Product>>;

    /// Searches products by term across name, description, and SKU.
    async fn search(&self, term: &str, page: PageRequest) -> EmporiumResult<Page<Product>>;

    /// Saves a new product.
    async fn save(&self, product: &Product) -> EmporiumResult<Product>;

    /// Updates an existing product.
    async fn update(&self, product: &Product) -> EmporiumResult<Product>;

    /// Soft-deletes a product by ID.
    async fn delete(&self, id: ProductId) -> EmporiumResult<bool>;

    /// Counts all products.
    async fn count(&self) -> EmporiumResult<u64>;
}

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> EmporiumResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> EmporiumResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> EmporiumResult<Option<User>>;

    /// Finds a user by username or email.
    async fn find_by_username_or_email(&self, identifier: &str) -> EmporiumResult<Option<User>>;

    /// Checks if a username exists.
    async fn exists_by_username(&self, username: &str) -> EmporiumResult<bool>;

    /// Checks if an email exists.
    async fn exists_by_email(&self, email: &str) -> EmporiumResult<bool>;

    /// Finds all users with pagination.
    async fn find_all(&self, page: PageRequest) -> EmporiumResult<Page<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> EmporiumResult<User>;

    /// Updates an existing user.
    async fn update(&self, user: &User) -> EmporiumResult<User>;

    /// Soft-deletes a user by ID.
    async fn delete(&self, id: UserId) -> EmporiumResult<bool>;

    /// Counts all users.
    async fn count(&self) -> EmporiumResult<u64>;
}
