//! Book (form) records.
//!
//! Field names follow the catalog wire format. Apart from `id`, every field
//! tolerates absence so that partially populated responses still decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A contributor to a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// ONIX contributor role code (e.g., "A01").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Reference to the abstract work a form belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
}

/// Subject classifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSubjects {
    #[serde(default)]
    pub bisac: Vec<String>,
    #[serde(default)]
    pub clil: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thema: Option<Vec<String>>,
}

/// Capabilities the reader has on a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCan {
    #[serde(default)]
    pub sample: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy: Option<bool>,
}

/// Price in minor currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPrice {
    /// Amount in cents (or the currency's minor unit).
    pub amount: i64,
    /// ISO 4217 code (USD, EUR, ...).
    pub currency: String,
    #[serde(default)]
    pub includes_taxes: bool,
}

/// Physical or digital extents of a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookExtents {
    /// Publisher page count. Preferred over `gl_pages`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Page count computed by the catalog from the rendered text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gl_pages: Option<u32>,
    /// Any other extent the catalog reports.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl BookExtents {
    /// Resolve the page count: `pages`, then `gl_pages`. Zero counts as absent.
    #[must_use]
    pub fn page_count(&self) -> Option<u32> {
        self.pages
            .filter(|&pages| pages > 0)
            .or(self.gl_pages.filter(|&pages| pages > 0))
    }
}

/// A fully resolved catalog record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Form identifier.
    pub id: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub book: BookInfo,
    #[serde(default)]
    pub can: BookCan,
    #[serde(default)]
    pub form: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub short_title: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Some responses omit the subjects block entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<BookSubjects>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extents: Option<BookExtents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<BookPrice>,
    /// Unix timestamp in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Book {
    /// Page count through the extents fallback chain.
    #[must_use]
    pub fn page_count(&self) -> Option<u32> {
        self.extents.as_ref().and_then(BookExtents::page_count)
    }

    #[must_use]
    pub fn primary_author(&self) -> Option<&Author> {
        self.authors.first()
    }

    /// Comma-separated author names, empty when the book has none.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|author| author.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True when the book is for sale and not free.
    #[must_use]
    pub fn can_buy(&self) -> bool {
        self.can.buy == Some(true) && !self.is_free
    }

    #[must_use]
    pub fn can_sample(&self) -> bool {
        self.can.sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extents(pages: Option<u32>, gl_pages: Option<u32>) -> BookExtents {
        BookExtents {
            pages,
            gl_pages,
            ..Default::default()
        }
    }

    #[test]
    fn page_count_prefers_publisher_pages() {
        assert_eq!(extents(Some(464), Some(500)).page_count(), Some(464));
    }

    #[test]
    fn page_count_falls_back_to_gl_pages() {
        assert_eq!(extents(None, Some(176)).page_count(), Some(176));
        assert_eq!(extents(Some(0), Some(176)).page_count(), Some(176));
    }

    #[test]
    fn page_count_absent_when_both_missing() {
        assert_eq!(extents(None, None).page_count(), None);
        assert_eq!(extents(Some(0), Some(0)).page_count(), None);
        assert_eq!(Book::default().page_count(), None);
    }

    #[test]
    fn can_buy_requires_flag_and_price() {
        let mut book = Book {
            can: BookCan {
                sample: true,
                buy: Some(true),
            },
            ..Default::default()
        };
        assert!(book.can_buy());
        assert!(book.can_sample());

        book.is_free = true;
        assert!(!book.can_buy());

        book.is_free = false;
        book.can.buy = None;
        assert!(!book.can_buy());
    }

    #[test]
    fn author_names_joins_in_order() {
        let book = Book {
            authors: vec![
                Author {
                    name: "Douglas Crockford".to_string(),
                    ..Default::default()
                },
                Author {
                    name: "Kyle Simpson".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(book.author_names(), "Douglas Crockford, Kyle Simpson");
        assert_eq!(
            book.primary_author().map(|a| a.name.as_str()),
            Some("Douglas Crockford")
        );
    }
}
