//! Pagination utilities for filtered listings

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Index of the first row on this page
    pub offset: i64,
}

impl Pagination {
    /// Row index range for slicing a result list of `total_results` rows
    pub fn row_range(&self, page_size: i64, total_results: usize) -> std::ops::Range<usize> {
        let start = (self.offset.max(0) as usize).min(total_results);
        let end = start
            .saturating_add(page_size.max(0) as usize)
            .min(total_results);
        start..end
    }
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]
///
/// # Examples
/// ```
/// use medadmin_review::pagination::calculate_pagination;
///
/// // 45 total results at 20 per page = 3 pages (20 + 20 + 5)
/// let p = calculate_pagination(45, 2, 20);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 20);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(45, 99, 20);
/// assert_eq!(p.page, 3);  // Clamped to last page
/// assert_eq!(p.offset, 40);
/// ```
pub fn calculate_pagination(total_results: i64, requested_page: i64, page_size: i64) -> Pagination {
    let page_size = page_size.max(1);
    let total_pages = if total_results > 0 {
        (total_results - 1) / page_size + 1
    } else {
        0
    };
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1).saturating_mul(page_size);

    Pagination {
        page,
        total_pages,
        offset,
    }
}
