//! Product entity.

use crate::ProductId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity for the catalog.
///
/// Price carries exact decimal semantics; the authoritative store never
/// rounds through floats. Products are only ever soft-deleted: the row is
/// retained and every read excludes flagged rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Unit price. Exact decimal, non-negative.
    pub price: Decimal,

    /// Units in stock. Non-negative.
    pub stock: i32,

    /// Optional category label.
    pub category: Option<String>,

    /// Unique stock-keeping unit.
    pub sku: String,

    /// Soft-delete flag. Flagged rows are invisible to all reads.
    pub is_deleted: bool,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub sku: Option<String>,
}

impl Product {
    /// Creates a new product.
    #[must_use]
    pub fn new(
        name: String,
        description: Option<String>,
        price: Decimal,
        stock: i32,
        category: Option<String>,
        sku: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name,
            description,
            price,
            stock,
            category,
            sku,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update. Only supplied fields change; the update
    /// timestamp is refreshed.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(sku) = patch.sku {
            self.sku = sku;
        }
        self.updated_at = Utc::now();
    }

    /// Flags the product as deleted. The row is retained.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }

    /// Returns true if the product has positive stock.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}
