//! Batched, cancellable collection loader.
//!
//! Identifiers are fetched in consecutive windows of `batch_size`. Fetches
//! inside a window run concurrently on the calling task and are all settled
//! before the window is published; a failed fetch is logged and skipped
//! without touching its siblings. Windows are separated by a short pause to
//! keep pressure off the remote service.
//!
//! Each [`BatchLoader::load`] call takes a new generation. The generation is
//! bumped and checked inside the state channel's write lock, so a superseded
//! sequence can never publish, even when its fetches resolve later.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use serde::{Deserialize, Serialize};
use shelf_api::BookFetcher;
use shelf_model::Book;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::LoadError;

/// Identifiers fetched concurrently per window.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Pause between two windows, in milliseconds.
pub const DEFAULT_INTER_BATCH_DELAY_MS: u64 = 100;

/// Loader tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Identifiers per window. Must be at least 1.
    pub batch_size: usize,
    /// Pause between windows, in milliseconds.
    pub inter_batch_delay_ms: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            inter_batch_delay_ms: DEFAULT_INTER_BATCH_DELAY_MS,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn inter_batch_delay(&self) -> Duration {
        Duration::from_millis(self.inter_batch_delay_ms)
    }
}

/// Snapshot of a load sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadState {
    /// Loaded records in arrival order.
    pub books: Vec<Book>,
    /// True while more windows may still publish.
    pub in_flight: bool,
    /// Set when the load could not proceed at all.
    pub error: Option<LoadError>,
    /// Number of identifiers in the current load.
    pub requested: usize,
}

impl LoadState {
    fn started(requested: usize) -> Self {
        Self {
            books: Vec::new(),
            in_flight: requested > 0,
            error: None,
            requested,
        }
    }

    fn failed(error: LoadError, requested: usize) -> Self {
        Self {
            books: Vec::new(),
            in_flight: false,
            error: Some(error),
            requested,
        }
    }

    /// Records loaded so far. Always equal to `books.len()`.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.books.len()
    }

    /// True once no further records will arrive for this load.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.in_flight
    }
}

/// How a [`BatchLoader::load`] call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Every window was fetched and published.
    Completed(LoadState),
    /// The identifier list or options were unusable.
    Failed(LoadError),
    /// A newer load started; nothing more was published by this call.
    Superseded,
}

/// Drives a [`BookFetcher`] over identifier lists and publishes [`LoadState`].
pub struct BatchLoader<F> {
    fetcher: F,
    options: LoadOptions,
    generation: AtomicU64,
    state: watch::Sender<LoadState>,
}

impl<F: BookFetcher> BatchLoader<F> {
    pub fn new(fetcher: F, options: LoadOptions) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self {
            fetcher,
            options,
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Stops the running sequence, keeping what was already published.
    pub fn cancel(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::AcqRel);
            state.in_flight = false;
        });
    }

    /// Loads `ids`, replacing any previous state and superseding a running load.
    ///
    /// Batch size and inter-batch pause come from the [`LoadOptions`] given to
    /// [`BatchLoader::new`].
    pub async fn load(&self, ids: &[String]) -> LoadOutcome {
        let token = self.begin(ids.len());
        let started = Instant::now();

        if let Err(error) = validate(ids, self.options.batch_size) {
            warn!(error = %error, requested = ids.len(), "load aborted");
            let failed = LoadState::failed(error.clone(), ids.len());
            if !self.publish(token, |state| *state = failed) {
                return LoadOutcome::Superseded;
            }
            return LoadOutcome::Failed(error);
        }

        if ids.is_empty() {
            return LoadOutcome::Completed(LoadState::started(0));
        }

        let batch_size = self.options.batch_size;
        let window_count = ids.len().div_ceil(batch_size);
        let mut failures = 0usize;

        for (index, window) in ids.chunks(batch_size).enumerate() {
            if !self.is_current(token) {
                debug!(window = index, "load superseded before window");
                return LoadOutcome::Superseded;
            }

            let (books, failed) = self.fetch_window(window).await;
            failures += failed;
            let last = index + 1 == window_count;
            debug!(
                window = index,
                window_count,
                loaded = books.len(),
                failed,
                "window settled"
            );

            let mut settled = None;
            let published = self.publish(token, |state| {
                state.books.extend(books);
                state.in_flight = !last;
                if last {
                    settled = Some(state.clone());
                }
            });
            if !published {
                debug!(window = index, "load superseded, dropping window");
                return LoadOutcome::Superseded;
            }

            if let Some(state) = settled {
                info!(
                    requested = ids.len(),
                    loaded = state.loaded_count(),
                    failed = failures,
                    duration_ms = started.elapsed().as_millis(),
                    "load complete"
                );
                return LoadOutcome::Completed(state);
            }

            tokio::time::sleep(self.options.inter_batch_delay()).await;
        }

        // Every iteration either returns or continues to a following window.
        LoadOutcome::Superseded
    }

    /// Fetches one window with an all-settled join. Returns the successes
    /// in completion order and the number of failures.
    async fn fetch_window(&self, window: &[String]) -> (Vec<Book>, usize) {
        let mut pending: FuturesUnordered<_> = window
            .iter()
            .map(|id| async move { (id, self.fetcher.fetch_book(id).await) })
            .collect();

        let mut books = Vec::with_capacity(window.len());
        let mut failed = 0;
        while let Some((id, result)) = pending.next().await {
            match result {
                Ok(book) => books.push(book),
                Err(error) => {
                    failed += 1;
                    warn!(book_id = %id, error = %error, "failed to load book");
                }
            }
        }
        (books, failed)
    }

    fn begin(&self, requested: usize) -> u64 {
        let mut token = 0;
        self.state.send_modify(|state| {
            token = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            *state = LoadState::started(requested);
        });
        token
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::Acquire) == token
    }

    /// Applies `update` only if `token` is still the current generation.
    fn publish(&self, token: u64, update: impl FnOnce(&mut LoadState)) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(token) {
                return false;
            }
            update(state);
            true
        })
    }
}

fn validate(ids: &[String], batch_size: usize) -> Result<(), LoadError> {
    if batch_size == 0 {
        return Err(LoadError::InvalidBatchSize);
    }
    if let Some(index) = ids.iter().position(|id| id.trim().is_empty()) {
        return Err(LoadError::InvalidIdentifier { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn validate_rejects_zero_batch() {
        assert_eq!(
            validate(&ids(&["a"]), 0),
            Err(LoadError::InvalidBatchSize)
        );
    }

    #[test]
    fn validate_rejects_blank_identifier() {
        assert_eq!(
            validate(&ids(&["a", " ", "c"]), 5),
            Err(LoadError::InvalidIdentifier { index: 1 })
        );
    }

    #[test]
    fn validate_accepts_duplicates_and_empty() {
        assert!(validate(&ids(&["a", "a"]), 1).is_ok());
        assert!(validate(&[], 5).is_ok());
    }

    #[test]
    fn started_state_for_empty_list_is_settled() {
        let state = LoadState::started(0);
        assert!(state.is_settled());
        assert_eq!(state.loaded_count(), 0);
        assert!(!LoadState::started(3).is_settled());
    }

    #[test]
    fn options_from_partial_toml() {
        let options: LoadOptions = toml::from_str("batch_size = 10").unwrap();
        assert_eq!(options.batch_size, 10);
        assert_eq!(options.inter_batch_delay(), Duration::from_millis(100));
    }
}
