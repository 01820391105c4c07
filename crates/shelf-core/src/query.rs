//! Search, filter and sort derivation.
//!
//! [`derive`] is a pure function of the loaded records and the query state.
//! It is recomputed from scratch on every change and never fails: absent
//! optional fields simply do not match a search and sort as minimal keys.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use shelf_model::Book;

use crate::collate::CollationKey;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Title, ascending.
    #[default]
    Title,
    /// First author's name, ascending. Books without authors sort first.
    Author,
    /// Page count, descending. Books without a count sort as 0.
    Pages,
}

impl SortKey {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title A-Z",
            Self::Author => "Author A-Z",
            Self::Pages => "Page count",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Structured filters. Each filter is skipped while unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub sort_by: SortKey,
    /// Keep only free books.
    pub free_only: bool,
    /// Keep only books whose adult flag equals this value.
    pub adult: Option<bool>,
    /// Keep only books in this language (exact match).
    pub language: Option<String>,
}

impl FilterSet {
    /// True when at least one narrowing filter is set. Sorting does not count.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.free_only || self.adult.is_some() || self.language.is_some()
    }

    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        if self.free_only && !book.is_free {
            return false;
        }
        if self.adult.is_some_and(|adult| book.adult != adult) {
            return false;
        }
        if let Some(language) = &self.language {
            if book.language != *language {
                return false;
            }
        }
        true
    }
}

/// Free-text query plus structured filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub text: String,
    pub filters: FilterSet,
}

impl QueryState {
    /// True when the query narrows the collection in any way.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.text.trim().is_empty() || self.filters.has_active_filters()
    }

    /// Derive the ordered subset of `books` this query selects.
    #[must_use]
    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        derive(books, &self.text, &self.filters)
    }
}

/// Search, filter, then sort `books`.
///
/// The sort is stable: records with equal keys keep their input order.
#[must_use]
pub fn derive<'a>(books: &'a [Book], text: &str, filters: &FilterSet) -> Vec<&'a Book> {
    let needle = text.trim().to_lowercase();
    let mut result: Vec<&Book> = books
        .iter()
        .filter(|book| needle.is_empty() || matches_text(book, &needle))
        .filter(|book| filters.matches(book))
        .collect();

    match filters.sort_by {
        SortKey::Title => result.sort_by_cached_key(|book| CollationKey::new(&book.title)),
        SortKey::Author => result.sort_by_cached_key(|book| {
            CollationKey::new(book.primary_author().map_or("", |a| a.name.as_str()))
        }),
        SortKey::Pages => result.sort_by_key(|book| Reverse(book.page_count().unwrap_or(0))),
    }
    result
}

/// True if the lowercase `needle` occurs in any searchable field.
fn matches_text(book: &Book, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);

    contains(&book.title)
        || book.authors.iter().any(|author| contains(&author.name))
        || book.description.as_deref().is_some_and(contains)
        || book.publisher.as_deref().is_some_and(contains)
        || book.isbn.as_deref().is_some_and(contains)
}

/// Distinct non-empty languages present in `books`, sorted.
#[must_use]
pub fn available_languages(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .map(|book| book.language.as_str())
        .filter(|language| !language.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
