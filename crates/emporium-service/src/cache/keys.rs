//! Cache key construction for the product namespace.
//!
//! Keys are deterministic: two requests with the same effective
//! parameters always produce the same key, so invalidation patterns
//! can target whole families of entries.

use emporium_core::{ProductFilter, ProductId, ProductSort};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Sentinel digest for an unfiltered, default-sorted listing.
const UNFILTERED: &str = "all";

/// Number of hex characters kept from the SHA-256 digest.
const DIGEST_LEN: usize = 8;

/// Key for a single product detail entry.
pub fn detail(id: ProductId) -> String {
    format!("products:detail:{}", id)
}

/// Key for one page of a filtered listing.
pub fn list(page: u32, page_size: u32, filter: &ProductFilter, sort: &ProductSort) -> String {
    format!(
        "products:list:{}:{}:{}",
        page,
        page_size,
        params_digest(filter, sort)
    )
}

/// Key for one page of search results.
pub fn search(query: &str, page: u32, page_size: u32) -> String {
    format!(
        "products:search:{}:{}:{}",
        text_digest(query),
        page,
        page_size
    )
}

/// Pattern matching every cached listing page.
pub fn list_pattern() -> &'static str {
    "products:list:*"
}

/// Pattern matching every cached search page.
pub fn search_pattern() -> &'static str {
    "products:search:*"
}

/// Digests filter and sort parameters into a short stable token.
///
/// Absent filter fields are omitted entirely and numeric values are
/// normalized, so `0.50` and `0.5` digest identically. A `BTreeMap`
/// keeps field ordering stable regardless of construction order.
fn params_digest(filter: &ProductFilter, sort: &ProductSort) -> String {
    if filter.is_empty() && sort.is_default() {
        return UNFILTERED.to_string();
    }

    let mut params: BTreeMap<&str, String> = BTreeMap::new();
    if let Some(name) = &filter.name {
        params.insert("name", name.clone());
    }
    if let Some(category) = &filter.category {
        params.insert("category", category.clone());
    }
    if let Some(min_price) = &filter.min_price {
        params.insert("min_price", min_price.normalize().to_string());
    }
    if let Some(max_price) = &filter.max_price {
        params.insert("max_price", max_price.normalize().to_string());
    }
    if filter.in_stock_only {
        params.insert("in_stock_only", "true".to_string());
    }
    if !sort.is_default() {
        params.insert("sort_by", sort.sort_by.as_str().to_string());
        params.insert("sort_order", sort.sort_order.as_str().to_string());
    }

    let canonical =
        serde_json::to_string(&params).unwrap_or_else(|_| format!("{:?}", params));
    text_digest(&canonical)
}

/// SHA-256 digest of a string, truncated to eight hex characters.
fn text_digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(DIGEST_LEN);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use emporium_core::{SortField, SortOrder};
    use rust_decimal_macros::dec;

    #[test]
    fn test_detail_key() {
        let id = ProductId::new();
        assert_eq!(detail(id), format!("products:detail:{}", id));
    }

    #[test]
    fn test_unfiltered_list_uses_sentinel() {
        let key = list(1, 10, &ProductFilter::default(), &ProductSort::default());
        assert_eq!(key, "products:list:1:10:all");
    }

    #[test]
    fn test_filtered_list_key_is_stable() {
        let filter = ProductFilter {
            category: Some("Books".to_string()),
            min_price: Some(dec!(5.00)),
            ..Default::default()
        };
        let sort = ProductSort::default();

        let first = list(2, 20, &filter, &sort);
        let second = list(2, 20, &filter, &sort);
        assert_eq!(first, second);
        assert!(first.starts_with("products:list:2:20:"));
        assert!(!first.ends_with(":all"));
    }

    #[test]
    fn test_normalized_prices_digest_identically() {
        let a = ProductFilter {
            min_price: Some(dec!(0.50)),
            ..Default::default()
        };
        let b = ProductFilter {
            min_price: Some(dec!(0.5)),
            ..Default::default()
        };
        let sort = ProductSort::default();
        assert_eq!(list(1, 10, &a, &sort), list(1, 10, &b, &sort));
    }

    #[test]
    fn test_distinct_filters_produce_distinct_keys() {
        let books = ProductFilter {
            category: Some("Books".to_string()),
            ..Default::default()
        };
        let toys = ProductFilter {
            category: Some("Toys".to_string()),
            ..Default::default()
        };
        let sort = ProductSort::default();
        assert_ne!(list(1, 10, &books, &sort), list(1, 10, &toys, &sort));
    }

    #[test]
    fn test_non_default_sort_changes_digest() {
        let filter = ProductFilter::default();
        let sorted = ProductSort {
            sort_by: SortField::Price,
            sort_order: SortOrder::Asc,
        };
        assert_ne!(
            list(1, 10, &filter, &ProductSort::default()),
            list(1, 10, &filter, &sorted)
        );
    }

    #[test]
    fn test_search_key_shape() {
        let key = search("wireless mouse", 1, 10);
        let parts: Vec<&str> = key.split(':').collect();
        assert_eq!(parts[0], "products");
        assert_eq!(parts[1], "search");
        assert_eq!(parts[2].len(), DIGEST_LEN);
        assert_eq!(parts[3], "1");
        assert_eq!(parts[4], "10");

        assert_eq!(key, search("wireless mouse", 1, 10));
        assert_ne!(key, search("wired mouse", 1, 10));
    }
}
