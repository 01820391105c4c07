//! View state for one shelf: load snapshot, query and page.
//!
//! The view layer owns a [`ShelfView`], feeds it load snapshots as the
//! loader publishes them, and dispatches user intents through the mutators.
//! Every mutator re-clamps the page index against the current result count.

use shelf_model::Book;

use crate::error::LoadError;
use crate::loader::LoadState;
use crate::pagination::PageState;
use crate::query::{FilterSet, QueryState, available_languages};

/// Read-only snapshot of what the view should render.
#[derive(Debug)]
pub struct VisibleShelf<'a> {
    /// Records on the current page, in display order.
    pub books: Vec<&'a Book>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Records matching the query across all pages.
    pub total_results: usize,
    pub loaded_count: usize,
    pub requested: usize,
    pub in_flight: bool,
    pub error: Option<&'a LoadError>,
    /// True when search text or a narrowing filter is set.
    pub is_filtered: bool,
    /// 1-based positions of the first and last visible result, if any.
    pub item_range: Option<(usize, usize)>,
}

#[derive(Debug, Clone, Default)]
pub struct ShelfView {
    query: QueryState,
    page: PageState,
    load: LoadState,
}

impl ShelfView {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: PageState::new(page_size),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    #[must_use]
    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Replace the load snapshot with a newer one.
    pub fn apply_load_state(&mut self, state: LoadState) {
        self.load = state;
        self.reclamp();
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
        self.reclamp();
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.query.filters = filters;
        self.reclamp();
    }

    /// Clear filters and sort back to their defaults. Search text is kept.
    pub fn reset_filters(&mut self) {
        self.set_filters(FilterSet::default());
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        let total = self.total_results();
        self.page.set_page_index(page_index, total);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.set_page_size(page_size);
    }

    pub fn first_page(&mut self) {
        self.page.first_page();
    }

    pub fn last_page(&mut self) {
        let total = self.total_results();
        self.page.last_page(total);
    }

    pub fn next_page(&mut self) {
        let total = self.total_results();
        self.page.next_page(total);
    }

    pub fn previous_page(&mut self) {
        let total = self.total_results();
        self.page.previous_page(total);
    }

    /// Back to an empty query on the first page, keeping the page size.
    pub fn reset(&mut self) {
        self.query = QueryState::default();
        self.page.first_page();
    }

    /// All records matching the query, in display order.
    #[must_use]
    pub fn results(&self) -> Vec<&Book> {
        self.query.apply(&self.load.books)
    }

    #[must_use]
    pub fn total_results(&self) -> usize {
        self.results().len()
    }

    /// Languages offered by the language filter.
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        available_languages(&self.load.books)
    }

    #[must_use]
    pub fn visible(&self) -> VisibleShelf<'_> {
        let results = self.results();
        let total_results = results.len();
        let page = self.page.paginate(&results);

        VisibleShelf {
            books: page.items.to_vec(),
            page_index: page.page_index,
            page_size: page.page_size,
            total_pages: page.total_pages,
            total_results,
            loaded_count: self.load.loaded_count(),
            requested: self.load.requested,
            in_flight: self.load.in_flight,
            error: self.load.error.as_ref(),
            is_filtered: self.query.is_filtered(),
            item_range: page.item_range(),
        }
    }

    fn reclamp(&mut self) {
        let total = self.total_results();
        self.page.clamp(total);
    }
}
