//! Pagination constants, clamp helpers, and the shared page envelope.
//!
//! Two listing conventions coexist in this codebase on purpose: most
//! listers run a COUNT query plus a LIMIT/OFFSET query and return a full
//! [`Page`], while feed-style endpoints fetch one extra row and report
//! only a `has_more` flag. Callers depend on the respective shapes.

use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a requested page size into `[1, max]`, falling back to `default`.
pub fn clamp_per_page(per_page: Option<i64>, default: i64, max: i64) -> i64 {
    per_page.unwrap_or(default).clamp(1, max)
}

/// Clamp a requested page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Generic pagination parameters (`?page=&per_page=`).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    /// Resolve to `(page, per_page, offset)` with defaults applied.
    pub fn resolve(self) -> (i64, i64, i64) {
        let page = clamp_page(self.page);
        let per_page = clamp_per_page(self.per_page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        (page, per_page, (page - 1) * per_page)
    }
}

/// Paginated response envelope for COUNT + LIMIT/OFFSET listers.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Assemble a page, deriving `total_pages = ceil(total / per_page)`.
    pub fn new(items: Vec<T>, total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_applies_defaults() {
        let (page, per_page, offset) = PageParams::default().resolve();
        assert_eq!(page, 1);
        assert_eq!(per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(offset, 0);
    }

    #[test]
    fn resolve_clamps_out_of_range() {
        let params = PageParams {
            page: Some(0),
            per_page: Some(10_000),
        };
        let (page, per_page, offset) = params.resolve();
        assert_eq!(page, 1);
        assert_eq!(per_page, MAX_PAGE_SIZE);
        assert_eq!(offset, 0);
    }

    #[test]
    fn resolve_computes_offset() {
        let params = PageParams {
            page: Some(3),
            per_page: Some(25),
        };
        assert_eq!(params.resolve(), (3, 25, 50));
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::<i32>::new(vec![], 5, 1, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn total_pages_zero_for_empty_set() {
        let page = Page::<i32>::new(vec![], 0, 1, 20);
        assert_eq!(page.total_pages, 0);
    }
}
