//! Filter and sort parameters for product list queries.
//!
//! A [`ProductFilter`] plus a [`ProductSort`] fully determines both the
//! store query and the cache key for a list read. The set is logically
//! unordered: two parameter sets with the same values are equal regardless
//! of how they were constructed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Optional predicates applied to a product list query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive name substring match.
    pub name: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Minimum price (inclusive).
    pub min_price: Option<Decimal>,
    /// Maximum price (inclusive).
    pub max_price: Option<Decimal>,
    /// Only products with positive stock.
    pub in_stock_only: bool,
}

impl ProductFilter {
    /// Returns true if no predicate is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && !self.in_stock_only
    }
}

/// Sortable product fields.
///
/// Unrecognized sort fields fall back to [`SortField::CreatedAt`] rather
/// than erroring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Price,
    Stock,
    #[default]
    CreatedAt,
}

impl SortField {
    /// Parses a sort field, falling back to the default for unknown values.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "name" => Self::Name,
            "price" => Self::Price,
            "stock" => Self::Stock,
            _ => Self::CreatedAt,
        }
    }

    /// Returns the column name used in SQL and cache keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::CreatedAt => "created_at",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parses a sort order, falling back to descending for unknown values.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "asc" => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// Returns the SQL keyword for this direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Sort specification for product list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSort {
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl ProductSort {
    /// Creates a sort specification from raw query strings with fallbacks.
    #[must_use]
    pub fn from_params(sort_by: &str, sort_order: &str) -> Self {
        Self {
            sort_by: SortField::parse_or_default(sort_by),
            sort_order: SortOrder::parse_or_default(sort_order),
        }
    }

    /// Returns true if this is the default sort (`created_at desc`).
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
