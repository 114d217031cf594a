//! PostgreSQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use emporium_core::{
    EmporiumResult, Page, PageRequest, Product, ProductFilter, ProductId, ProductSort,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, stock, category, sku, is_deleted, created_at, updated_at";

/// PostgreSQL product repository implementation.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: Arc<DatabasePool>,
}

impl PgProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i32,
    category: Option<String>,
    sku: String,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
            category: row.category,
            sku: row.sku,
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Appends filter predicates to a query builder.
///
/// Both the COUNT query and the page query go through this function so
/// the reported total always matches the filtered rows.
fn push_filter_predicates(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    qb.push(" WHERE is_deleted = FALSE");

    if let Some(name) = &filter.name {
        qb.push(" AND name ILIKE ");
        qb.push_bind(format!("%{}%", name));
    }
    if let Some(category) = &filter.category {
        qb.push(" AND category = ");
        qb.push_bind(category.clone());
    }
    if let Some(min_price) = filter.min_price {
        qb.push(" AND price >= ");
        qb.push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        qb.push(" AND price <= ");
        qb.push_bind(max_price);
    }
    if filter.in_stock_only {
        qb.push(" AND stock > 0");
    }
}

/// Appends search predicates to a query builder.
fn push_search_predicates(qb: &mut QueryBuilder<'_, Postgres>, term: &str) {
    let pattern = format!("%{}%", term);

    qb.push(" WHERE is_deleted = FALSE AND (name ILIKE ");
    qb.push_bind(pattern.clone());
    qb.push(" OR description ILIKE ");
    qb.push_bind(pattern.clone());
    qb.push(" OR sku ILIKE ");
    qb.push_bind(pattern);
    qb.push(")");
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND is_deleted = FALSE"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn find_by_sku(&self, sku: &str) -> EmporiumResult<Option<Product>> {
        debug!("Finding product by sku: {}", sku);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = $1 AND is_deleted = FALSE"
        ))
        .bind(sku)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn exists_by_sku(&self, sku: &str) -> EmporiumResult<bool> {
        let result: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM products WHERE sku = $1 AND is_deleted = FALSE LIMIT 1",
        )
        .bind(sku)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(result.is_some())
    }

    async fn find_page(
        &self,
        filter: &ProductFilter,
        sort: &ProductSort,
        page: PageRequest,
    ) -> EmporiumResult<Page<Product>> {
        debug!(
            "Finding products, page: {}, size: {}, sort: {} {}",
            page.page,
            page.page_size,
            sort.sort_by.as_str(),
            sort.sort_order.as_str()
        );

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filter_predicates(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut qb = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        push_filter_predicates(&mut qb, filter);
        // Sort column and direction come from a whitelisted enum
        qb.push(format!(
            " ORDER BY {} {}",
            sort.sort_by.as_str(),
            sort.sort_order.as_str()
        ));
        qb.push(" LIMIT ");
        qb.push_bind(page.limit());
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());

        let rows: Vec<ProductRow> = qb
            .build_query_as()
            .fetch_all(self.pool.inner())
            .await?;

        let products: Vec<Product> = rows.into_iter().map(Product::from).collect();

        Ok(Page::new(products, total as u64, page))
    }

    async fn search(&self, term: &str, page: PageRequest) -> EmporiumResult<Page<Product>> {
        debug!("Searching products for: {}", term);

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_search_predicates(&mut count_qb, term);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut qb = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        push_search_predicates(&mut qb, term);
        qb.push(" ORDER BY created_at DESC");
        qb.push(" LIMIT ");
        qb.push_bind(page.limit());
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());

        let rows: Vec<ProductRow> = qb
            .build_query_as()
            .fetch_all(self.pool.inner())
            .await?;

        let products: Vec<Product> = rows.into_iter().map(Product::from).collect();

        Ok(Page::new(products, total as u64, page))
    }

    async fn save(&self, product: &Product) -> EmporiumResult<Product> {
        debug!("Saving new product: {}", product.sku);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (id, name, description, price, stock, category, sku,
                                  is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.id.into_inner())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.category)
        .bind(&product.sku)
        .bind(product.is_deleted)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(Product::from(row))
    }

    async fn update(&self, product: &Product) -> EmporiumResult<Product> {
        debug!("Updating product: {}", product.id);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, stock = $4,
                category = $5, sku = $6, updated_at = $7
            WHERE id = $8 AND is_deleted = FALSE
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.category)
        .bind(&product.sku)
        .bind(product.updated_at)
        .bind(product.id.into_inner())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(Product::from(row))
    }

    async fn delete(&self, id: ProductId) -> EmporiumResult<bool> {
        debug!("Soft deleting product: {}", id);

        let result = sqlx::query(
            "UPDATE products SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> EmporiumResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_deleted = FALSE")
                .fetch_one(self.pool.inner())
                .await?;

        Ok(count as u64)
    }
}

impl std::fmt::Debug for PgProductRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgProductRepository").finish_non_exhaustive()
    }
}
