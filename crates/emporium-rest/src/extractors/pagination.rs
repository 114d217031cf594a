//! Pagination extractor.

use emporium_core::PageRequest;
use serde::Deserialize;

/// Query parameters for pagination. Pages are 1-indexed; out-of-range
/// values are clamped by [`PageRequest::new`].
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: Some(1),
            page_size: Some(PageRequest::DEFAULT_SIZE),
        }
    }
}
