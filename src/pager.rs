//! Table pagination for listing views.
//!
//! [`paginate`] turns an arbitrary row list into the slice for one page plus
//! the metadata a template needs to draw pagination controls: one numbered
//! link per page, and previous/next links. Rows are opaque to the pager —
//! ordering and contents are entirely the caller's business.
//!
//! Links are relative query strings (`?page=<n>`); the caller combines them
//! with the current path.
//!
//! ## Out-of-range pages
//!
//! Requesting a page past the end is not an error: the row slice is empty,
//! no item is marked current, and previous/next are still derived from the
//! same comparisons (`previous` when `current_page > 1`, `next` when
//! `current_page < number_of_pages`). Listing views are driven by a raw
//! `?page=` query parameter, and a stale link after rows were deleted should
//! degrade to an empty page, not a failure.

use serde::Serialize;

/// Default page size for listing views.
pub const DEFAULT_ROWS_PER_PAGE: usize = 20;

/// A numbered page link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageItem {
    pub number: usize,
    pub href: String,
    /// Serialized only when true, so templates can test for mere presence.
    #[serde(skip_serializing_if = "is_false")]
    pub current: bool,
}

/// A previous/next link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub href: String,
}

/// Pagination controls for one page of a multi-page listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub items: Vec<PageItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn page_href(number: usize) -> String {
    format!("?page={number}")
}

/// Slice `rows` down to one page and build the matching metadata.
///
/// Returns `(None, rows)` unchanged when everything fits on a single page —
/// no pagination UI should render for single-page results. `current_page`
/// is 1-based; `rows_per_page` must be positive.
pub fn paginate<T>(
    rows: &[T],
    current_page: usize,
    rows_per_page: usize,
) -> (Option<Pagination>, &[T]) {
    debug_assert!(rows_per_page > 0, "rows_per_page must be positive");
    debug_assert!(current_page >= 1, "current_page is 1-based");

    if rows.len() <= rows_per_page {
        return (None, rows);
    }

    let number_of_pages = rows.len().div_ceil(rows_per_page);
    let start = (current_page - 1).saturating_mul(rows_per_page);
    let end = (start + rows_per_page).min(rows.len());
    let page_rows = if start < rows.len() {
        &rows[start..end]
    } else {
        &[]
    };

    let items = (1..=number_of_pages)
        .map(|number| PageItem {
            number,
            href: page_href(number),
            current: number == current_page,
        })
        .collect();

    let previous = (current_page > 1).then(|| PageLink {
        href: page_href(current_page - 1),
    });
    let next = (current_page < number_of_pages).then(|| PageLink {
        href: page_href(current_page + 1),
    });

    (
        Some(Pagination {
            items,
            previous,
            next,
        }),
        page_rows,
    )
}

/// View model for a tabular listing page: header, one page of rows, and the
/// pagination block when there is more than one page. Serializes to the
/// nested structure templates consume.
#[derive(Debug, Clone, Serialize)]
pub struct TablePage<T: Serialize> {
    pub table_header: Vec<String>,
    pub table_rows: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize + Clone> TablePage<T> {
    pub fn new(
        table_header: Vec<String>,
        rows: Vec<T>,
        current_page: usize,
        rows_per_page: usize,
    ) -> Self {
        let (pagination, page_rows) = paginate(&rows, current_page, rows_per_page);
        Self {
            table_header,
            table_rows: page_rows.to_vec(),
            pagination,
        }
    }
}
