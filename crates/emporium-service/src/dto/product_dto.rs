//! Product DTOs.

use chrono::{DateTime, Utc};
use emporium_core::rules::non_negative_price;
use emporium_core::{Product, ProductId, ProductPatch};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new product.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "non_negative_price"))]
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Stock must be non-negative"))]
    pub stock: i32,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 50, message = "SKU must be 1-50 characters"))]
    pub sku: String,
}

impl CreateProductRequest {
    /// Builds the domain entity from the validated request.
    #[must_use]
    pub fn into_product(self) -> Product {
        Product::new(
            self.name,
            self.description,
            self.price,
            self.stock,
            self.category,
            self.sku,
        )
    }
}

/// Request to partially update a product. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "non_negative_price"))]
    #[schema(value_type = Option<String>, example = "25.00")]
    pub price: Option<Decimal>,

    #[validate(range(min = 0, message = "Stock must be non-negative"))]
    pub stock: Option<i32>,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 50, message = "SKU must be 1-50 characters"))]
    pub sku: Option<String>,
}

impl UpdateProductRequest {
    /// Returns true when no field is supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.sku.is_none()
    }

    /// Converts the request into a domain patch.
    #[must_use]
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            sku: self.sku,
        }
    }
}

/// Product representation returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub stock: i32,
    pub category: Option<String>,
    pub sku: String,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            sku: product.sku,
            in_stock: product.stock > 0,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        product.clone().into()
    }
}
