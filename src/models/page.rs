//! Pagination types shared by the listing operations.

use serde::{Deserialize, Serialize};

/// A requested page, as supplied by a caller. Values are normalized before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Maximum number of items per page.
    pub limit: u32,
}

impl PageRequest {
    /// Creates a page request.
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Clamps out-of-range values: page 0 becomes 1, and a limit of 0 or
    /// above `max_limit` falls back to `default_limit`.
    ///
    /// ```
    /// use hr_ledger::models::PageRequest;
    ///
    /// let normalized = PageRequest::new(0, 500).normalize(10, 100);
    /// assert_eq!(normalized, PageRequest::new(1, 10));
    /// ```
    pub fn normalize(self, default_limit: u32, max_limit: u32) -> Self {
        let page = self.page.max(1);
        let limit = if self.limit == 0 || self.limit > max_limit {
            default_limit
        } else {
            self.limit
        };
        Self { page, limit }
    }

    /// Number of items to skip.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total: u64,
    /// The page number returned.
    pub page: u32,
    /// The page size used.
    pub limit: u32,
}

impl<T> Page<T> {
    /// Slices an already filtered and ordered list into the requested page.
    pub fn from_sorted(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(request.offset())
            .take(request.limit as usize)
            .collect();
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
        }
    }
}
