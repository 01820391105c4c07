//! Client for the catalog REST API.
//!
//! Three endpoints are consumed: a user's shelves, the ordered form ids of a
//! shelf, and the full record of a single form. Base URL and user id are
//! injected through [`ApiConfig`] so that tests and alternate accounts never
//! depend on process-wide constants.
//!
//! The single-record endpoint is also exposed through the [`BookFetcher`]
//! trait, which is the seam the batched loader drives.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;

pub use client::CatalogClient;
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use fetcher::BookFetcher;
