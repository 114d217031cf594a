//! Product catalog controller.
//!
//! Reads are open; mutations require the admin role.

use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use emporium_core::{
    EmporiumError, PageRequest, ProductFilter, ProductId, ProductSort, UserRole,
};
use emporium_security::ClaimsExt;
use emporium_service::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Query parameters for product listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub in_stock_only: bool,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ProductListQuery {
    fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }

    fn filter(&self) -> ProductFilter {
        ProductFilter {
            name: self.name.clone(),
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock_only: self.in_stock_only,
        }
    }

    fn sort(&self) -> ProductSort {
        ProductSort::from_params(
            self.sort_by.as_deref().unwrap_or(""),
            self.sort_order.as_deref().unwrap_or(""),
        )
    }
}

/// Query parameters for product search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// List products with filtering, sorting, and pagination.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("page_size" = Option<u32>, Query, description = "Items per page (max 100)"),
        ("name" = Option<String>, Query, description = "Name substring filter"),
        ("category" = Option<String>, Query, description = "Exact category filter"),
        ("min_price" = Option<String>, Query, description = "Minimum price (inclusive)"),
        ("max_price" = Option<String>, Query, description = "Maximum price (inclusive)"),
        ("in_stock_only" = Option<bool>, Query, description = "Only products with stock"),
        ("sort_by" = Option<String>, Query, description = "Sort field: name, price, stock, created_at"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc or desc"),
    ),
    responses(
        (status = 200, description = "Page of products")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<emporium_core::Page<ProductResponse>> {
    debug!("List products request");

    let response = state
        .product_service
        .list_products(query.filter(), query.sort(), query.page_request())
        .await?;
    ok(response)
}

/// Search products by a free-text term.
#[utoipa::path(
    get,
    path = "/products/search",
    tag = "products",
    params(
        ("q" = String, Query, description = "Search term"),
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("page_size" = Option<u32>, Query, description = "Items per page (max 100)"),
    ),
    responses(
        (status = 200, description = "Page of matching products"),
        (status = 400, description = "Empty search term")
    )
)]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<emporium_core::Page<ProductResponse>> {
    debug!("Search products request: '{}'", query.q);

    let page = PageRequest::new(
        query.page.unwrap_or(1),
        query.page_size.unwrap_or(PageRequest::DEFAULT_SIZE),
    );
    let response = state.product_service.search_products(&query.q, page).await?;
    ok(response)
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductResponse> {
    debug!("Get product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let response = state.product_service.get_product(product_id).await?;
    ok(response)
}

/// Create a new product (admin only).
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Duplicate SKU")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>), AppError> {
    debug!("Create product request: {}", request.sku);

    user.require_role(UserRole::Admin)?;

    let response = state.product_service.create_product(request).await?;
    Ok(created(response))
}

/// Partially update a product (admin only).
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Duplicate SKU")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<ProductResponse> {
    debug!("Update product request: {}", id);

    user.require_role(UserRole::Admin)?;

    let product_id = parse_product_id(&id)?;
    let response = state
        .product_service
        .update_product(product_id, request)
        .await?;
    ok(response)
}

/// Soft-delete a product (admin only).
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);

    user.require_role(UserRole::Admin)?;

    let product_id = parse_product_id(&id)?;
    state.product_service.delete_product(product_id).await?;

    Ok(no_content())
}

/// Helper to parse a product ID from a path parameter.
fn parse_product_id(id: &str) -> Result<ProductId, AppError> {
    ProductId::parse(id)
        .map_err(|_| AppError(EmporiumError::validation(format!("Invalid product ID: {}", id))))
}
