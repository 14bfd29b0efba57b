use std::ops::RangeInclusive;

use serde::Serialize;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_CHOICES: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 25;
/// Smallest page produced by [`page_size_for_height`].
pub const MIN_DYNAMIC_PAGE_SIZE: usize = 5;

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number, after clamping.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Items across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position of the first item, for row numbering.
    pub fn first_index(&self) -> usize {
        (self.page - 1) * self.page_size + 1
    }
}

/// `ceil(total / page_size)`, never less than one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// Clamp `page` into `[1, total_pages]`.
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(total, page_size))
}

/// Slice `[(page-1)*size, page*size)` of `items` after clamping `page`.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let page = clamp_page(page, total, page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);

    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        page_size,
        total_pages: total_pages(total, page_size),
        total,
    }
}

/// Rows that fit in `usable_height`, at least [`MIN_DYNAMIC_PAGE_SIZE`].
pub fn page_size_for_height(usable_height: usize, row_height: usize) -> usize {
    (usable_height / row_height.max(1)).max(MIN_DYNAMIC_PAGE_SIZE)
}

/// Current page of a table view.
///
/// The page is re-clamped whenever the row count or the page size changes,
/// so deleting the last row of the last page lands on the new last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn goto(&mut self, page: usize, total: usize) -> usize {
        self.current = clamp_page(page, total, self.page_size);
        self.current
    }

    pub fn next(&mut self, total: usize) -> usize {
        self.goto(self.current.saturating_add(1), total)
    }

    pub fn prev(&mut self, total: usize) -> usize {
        self.goto(self.current.saturating_sub(1), total)
    }

    pub fn clamp_to(&mut self, total: usize) -> usize {
        self.goto(self.current, total)
    }

    pub fn set_page_size(&mut self, page_size: usize, total: usize) {
        self.page_size = page_size.max(1);
        self.clamp_to(total);
    }

    pub fn page<T: Clone>(&self, items: &[T]) -> Page<T> {
        paginate(items, self.page_size, self.current)
    }

    /// Page numbers for the page buttons: up to `width` pages around the
    /// current one, shifted to stay inside `[1, total_pages]`.
    pub fn page_window(&self, total: usize, width: usize) -> RangeInclusive<usize> {
        let width = width.max(1);
        let last = total_pages(total, self.page_size);
        let current = self.current.min(last);
        let mut start = current.saturating_sub(width / 2).max(1);
        let end = (start + width - 1).min(last);
        if end - start < width - 1 {
            start = end.saturating_sub(width - 1).max(1);
        }
        start..=end
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
