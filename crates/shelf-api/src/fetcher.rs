//! Single-record fetch seam.

use std::future::Future;
use std::sync::Arc;

use shelf_model::Book;

use crate::client::CatalogClient;
use crate::error::Result;

/// Resolves one identifier to its full record.
///
/// Implementations fetch exactly one record per call, are idempotent, and do
/// no batching of their own.
pub trait BookFetcher: Send + Sync {
    /// Fetches the record for `id`.
    fn fetch_book(&self, id: &str) -> impl Future<Output = Result<Book>> + Send;
}

impl BookFetcher for CatalogClient {
    fn fetch_book(&self, id: &str) -> impl Future<Output = Result<Book>> + Send {
        self.book_details(id)
    }
}

impl<F: BookFetcher> BookFetcher for Arc<F> {
    fn fetch_book(&self, id: &str) -> impl Future<Output = Result<Book>> + Send {
        (**self).fetch_book(id)
    }
}
