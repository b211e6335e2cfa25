//! Pagination math and the page-number strip.

use std::fmt;
use std::ops::Range;

/// Number of pages needed for `total_count` rows; never less than one.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}

/// Clamps a 1-indexed page number into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of the rows shown on `page`.
///
/// The range is empty when the page lies past the end of the rows.
pub fn page_bounds(page: usize, page_size: usize, total_count: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(total_count);
    let end = start.saturating_add(page_size).min(total_count);
    start..end
}

/// One entry of a page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable page number.
    Page(usize),
    /// A gap marker ("…").
    Ellipsis,
}

/// Builds the page-number strip shown under a table.
///
/// Page 1 and the last page are always present, together with `delta`
/// neighbours on each side of the current page. Gaps are collapsed into a
/// single [`PageItem::Ellipsis`]. `current` is clamped into
/// `[1, total_pages]` first.
///
/// # Example
///
/// ```
/// use leadgrid_lib::table::{page_strip, PageItem::{Ellipsis, Page}};
///
/// assert_eq!(
///     page_strip(6, 12, 1),
///     vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(12)]
/// );
/// assert_eq!(page_strip(1, 1, 2), vec![Page(1)]);
/// ```
pub fn page_strip(current: usize, total_pages: usize, delta: usize) -> Vec<PageItem> {
    let total = total_pages.max(1);
    let current = clamp_page(current, total);

    let mut items = vec![PageItem::Page(1)];

    if current > delta.saturating_add(2) {
        items.push(PageItem::Ellipsis);
    }

    let start = current.saturating_sub(delta).max(2);
    let end = current.saturating_add(delta).min(total - 1);
    for page in start..=end {
        items.push(PageItem::Page(page));
    }

    if current.saturating_add(delta).saturating_add(1) < total {
        items.push(PageItem::Ellipsis);
    }

    if total > 1 {
        items.push(PageItem::Page(total));
    }

    items
}

/// "Showing first-last of total" numbers for the rows on the current page.
///
/// Positions are 1-indexed; an empty table reports `0-0 of 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// Position of the first row on the page.
    pub first: usize,
    /// Position of the last row on the page.
    pub last: usize,
    /// Number of rows across all pages.
    pub total: usize,
}

impl PageSummary {
    /// Computes the summary for a page.
    pub fn new(page: usize, page_size: usize, total_count: usize) -> Self {
        let bounds = page_bounds(page, page_size, total_count);
        if bounds.is_empty() {
            return Self {
                first: 0,
                last: 0,
                total: total_count,
            };
        }
        Self {
            first: bounds.start + 1,
            last: bounds.end,
            total: total_count,
        }
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} of {}", self.first, self.last, self.total)
    }
}
