//! Client-side aggregation pipeline for shelf views.
//!
//! Data flows one way:
//!
//! ```text
//! identifiers -> BatchLoader -> LoadState.books -> derive -> paginate -> visible page
//! ```
//!
//! - [`loader`] drives a [`shelf_api::BookFetcher`] over an identifier list in
//!   fixed-size windows and publishes incremental [`LoadState`] snapshots.
//! - [`query`] is the pure search/filter/sort derivation.
//! - [`pagination`] is the pure windowing step plus the page-index state.
//! - [`view`] ties the three states together behind the mutators a view
//!   layer dispatches to.

pub mod collate;
pub mod error;
pub mod loader;
pub mod pagination;
pub mod query;
pub mod view;

pub use error::LoadError;
pub use loader::{BatchLoader, LoadOptions, LoadOutcome, LoadState};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, PageState, paginate, total_pages};
pub use query::{FilterSet, QueryState, SortKey, available_languages, derive};
pub use view::{ShelfView, VisibleShelf};
