//! Pagination types for list operations.
//!
//! Pages are 1-indexed. The serialized [`Page`] shape is wire-stable: cached
//! copies of a page must deserialize to exactly what the store produced.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub page_size: u32,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: u32 = 10;
    /// The maximum allowed page size.
    pub const MAX_SIZE: u32 = 100;

    /// Creates a new page request, clamping to valid bounds.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }

    /// Returns the offset for database queries.
    ///
    /// Computed in i64 so that arbitrarily large page numbers produce a
    /// valid (empty) offset instead of overflowing.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The total number of items across all pages.
    pub total: u64,
    /// The current page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub page_size: u32,
    /// The total number of pages (minimum 1, even when empty).
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Creates a new page, computing `total_pages` from the total count.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages: total_pages(total, request.page_size),
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Maps the page items to a different type, keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }

    /// Returns true if the page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there is a page after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages
    }
}

/// Computes the total page count: `ceil(total / page_size)`, minimum 1.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if total == 0 {
        return 1;
    }
    total.div_ceil(page_size as u64)
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_offset() {
        let req = PageRequest::new(1, 10);
        assert_eq!(req.offset(), 0);
        assert_eq!(req.limit(), 10);

        let req = PageRequest::new(3, 10);
        assert_eq!(req.offset(), 20);

        let req = PageRequest::new(5, 15);
        assert_eq!(req.offset(), 60);
    }

    #[test]
    fn test_offset_large_page_number() {
        let req = PageRequest::new(u32::MAX, 100);
        assert_eq!(req.offset(), (u32::MAX as i64 - 1) * 100);

        let req = PageRequest::new(u32::MAX, PageRequest::MAX_SIZE);
        assert!(req.offset() > 0);
    }

    #[test]
    fn test_page_request_clamping() {
        let req = PageRequest::new(0, 1000);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, PageRequest::MAX_SIZE);

        let req = PageRequest::new(2, 0);
        assert_eq!(req.page_size, 1);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn test_page_metadata() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], 25, PageRequest::new(1, 10));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.len(), 3);
        assert!(page.has_next());

        let last: Page<i32> = Page::new(vec![1], 25, PageRequest::new(3, 10));
        assert!(!last.has_next());
    }

    #[test]
    fn test_empty_page_has_one_total_page() {
        let page: Page<i32> = Page::empty(PageRequest::first());
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 3, PageRequest::first());
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total, 3);
    }

    #[test]
    fn test_page_wire_shape() {
        let page = Page::new(vec!["a"], 1, PageRequest::new(1, 10));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"][0], "a");
        assert_eq!(json["total"], 1);
        assert_eq!(json["page"], 1);
        assert_eq!(json["page_size"], 10);
        assert_eq!(json["total_pages"], 1);
    }
}
