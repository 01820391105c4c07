//! Windowing over an ordered sequence.
//!
//! Page indices are 1-based. There is always at least one page, even for an
//! empty sequence, and out-of-range indices clamp silently.

/// Items per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Number of pages needed for `total_items`. Never zero.
#[must_use]
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

fn clamp_index(page_index: usize, total_items: usize, page_size: usize) -> usize {
    page_index.clamp(1, total_pages(total_items, page_size))
}

/// One visible window of a sequence.
#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Effective (clamped) page index.
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }

    /// 1-based positions of the first and last visible item, if any.
    #[must_use]
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page_index - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }
}

/// Slice `items` to page `page_index` of `page_size` items.
///
/// A `page_size` of 0 is treated as 1.
#[must_use]
pub fn paginate<T>(items: &[T], page_index: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let page_index = clamp_index(page_index, total_items, page_size);
    let start = ((page_index - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Page {
        items: &items[start..end],
        page_index,
        page_size,
        total_pages: total_pages(total_items, page_size),
        total_items,
    }
}

/// Current page index and size for a view.
///
/// The index is kept within `[1, total_pages]` of the last total it was
/// clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_index: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 1,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_index(&mut self, page_index: usize, total_items: usize) {
        self.page_index = clamp_index(page_index, total_items, self.page_size);
    }

    /// Change the page size. Always returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 1;
    }

    /// Re-clamp the index after the item count changed.
    pub fn clamp(&mut self, total_items: usize) {
        self.set_page_index(self.page_index, total_items);
    }

    pub fn first_page(&mut self) {
        self.page_index = 1;
    }

    pub fn last_page(&mut self, total_items: usize) {
        self.page_index = total_pages(total_items, self.page_size);
    }

    pub fn next_page(&mut self, total_items: usize) {
        self.set_page_index(self.page_index.saturating_add(1), total_items);
    }

    pub fn previous_page(&mut self, total_items: usize) {
        self.set_page_index(self.page_index.saturating_sub(1), total_items);
    }

    #[must_use]
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, self.page_index, self.page_size)
    }
}
