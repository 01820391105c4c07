//! Query derivation scenarios and properties.

use proptest::prelude::*;
use shelf_core::{FilterSet, SortKey, derive};
use shelf_model::{Author, Book, BookExtents};

fn titled(id: &str, title: &str) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        ..Default::default()
    }
}

fn with_pages(id: &str, pages: Option<u32>, gl_pages: Option<u32>) -> Book {
    Book {
        id: id.to_string(),
        extents: Some(BookExtents {
            pages,
            gl_pages,
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn ids(books: &[&Book]) -> Vec<String> {
    books.iter().map(|book| book.id.clone()).collect()
}

fn sorted_by(sort_by: SortKey) -> FilterSet {
    FilterSet {
        sort_by,
        ..Default::default()
    }
}

#[test]
fn search_keeps_only_matching_title() {
    let books = vec![
        titled("1", "Eloquent JavaScript"),
        titled("2", "The Rust Programming Language"),
    ];
    let result = derive(&books, "JavaScript", &FilterSet::default());
    assert_eq!(ids(&result), vec!["1"]);
}

#[test]
fn search_is_trimmed_and_case_insensitive() {
    let books = vec![titled("1", "Eloquent JavaScript"), titled("2", "Dune")];
    assert_eq!(
        ids(&derive(&books, "  javascript \t", &FilterSet::default())),
        vec!["1"]
    );
}

#[test]
fn search_ignores_absent_fields() {
    let books = vec![Book {
        id: "1".to_string(),
        ..Default::default()
    }];
    assert!(derive(&books, "anything", &FilterSet::default()).is_empty());
}

#[test]
fn pages_sort_descending() {
    let books = vec![with_pages("small", Some(176), None), with_pages("large", Some(464), None)];
    let result = derive(&books, "", &sorted_by(SortKey::Pages));
    assert_eq!(ids(&result), vec!["large", "small"]);
}

#[test]
fn pages_sort_uses_fallback_and_treats_missing_as_zero() {
    let books = vec![
        Book {
            id: "none".to_string(),
            ..Default::default()
        },
        with_pages("gl", None, Some(300)),
        with_pages("publisher", Some(200), Some(900)),
    ];
    let result = derive(&books, "", &sorted_by(SortKey::Pages));
    assert_eq!(ids(&result), vec!["gl", "publisher", "none"]);
}

#[test]
fn author_sort_puts_authorless_books_first() {
    let author = |name: &str| Author {
        name: name.to_string(),
        ..Default::default()
    };
    let mut zola = titled("zola", "Germinal");
    zola.authors = vec![author("Zola"), author("Aaron")];
    let mut eco = titled("eco", "Il nome della rosa");
    eco.authors = vec![author("Eco")];
    let anonymous = titled("anon", "Beowulf");

    let books = [zola, eco, anonymous];
    let result = derive(&books, "", &sorted_by(SortKey::Author));
    assert_eq!(ids(&result), vec!["anon", "eco", "zola"]);
}

#[test]
fn title_sort_is_locale_aware() {
    let books = vec![
        titled("1", "zebra"),
        titled("2", "Émile"),
        titled("3", "apple"),
        titled("4", "Banana"),
    ];
    let result = derive(&books, "", &FilterSet::default());
    assert_eq!(ids(&result), vec!["3", "4", "2", "1"]);
}

#[test]
fn title_sort_puts_punctuation_and_digits_before_letters() {
    let books = vec![
        titled("1", "Dune"),
        titled("2", "1984"),
        titled("3", "_Notes"),
        titled("4", "~Tilde Tales"),
        titled("5", "[Draft]"),
    ];
    let result = derive(&books, "", &FilterSet::default());
    assert_eq!(ids(&result), vec!["5", "3", "4", "2", "1"]);
}

#[test]
fn free_only_and_language_combine() {
    let mut free_en = titled("1", "A");
    free_en.is_free = true;
    free_en.language = "en".to_string();
    let mut free_fr = titled("2", "B");
    free_fr.is_free = true;
    free_fr.language = "fr".to_string();
    let mut paid_en = titled("3", "C");
    paid_en.language = "en".to_string();

    let filters = FilterSet {
        free_only: true,
        language: Some("en".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&derive(&[free_en, free_fr, paid_en], "", &filters)), vec!["1"]);
}

fn arb_book() -> impl Strategy<Value = Book> {
    (
        "[a-z]{1,6}",
        "[A-Za-z ]{0,12}",
        prop::option::of(0u32..600),
        any::<bool>(),
        any::<bool>(),
        prop::sample::select(vec!["", "en", "fr", "de"]),
    )
        .prop_map(|(id, title, pages, is_free, adult, language)| Book {
            id,
            title,
            is_free,
            adult,
            language: language.to_string(),
            extents: Some(BookExtents {
                pages,
                ..Default::default()
            }),
            ..Default::default()
        })
}

fn arb_filters() -> impl Strategy<Value = FilterSet> {
    (
        prop::sample::select(vec![SortKey::Title, SortKey::Author, SortKey::Pages]),
        any::<bool>(),
        prop::option::of(any::<bool>()),
        prop::option::of(prop::sample::select(vec!["en", "fr"])),
    )
        .prop_map(|(sort_by, free_only, adult, language)| FilterSet {
            sort_by,
            free_only,
            adult,
            language: language.map(str::to_string),
        })
}

proptest! {
    #[test]
    fn derive_is_idempotent(
        books in prop::collection::vec(arb_book(), 0..30),
        text in "[a-z ]{0,3}",
        filters in arb_filters(),
    ) {
        let first = derive(&books, &text, &filters);
        let second = derive(&books, &text, &filters);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn derive_returns_a_subset_that_satisfies_filters(
        books in prop::collection::vec(arb_book(), 0..30),
        filters in arb_filters(),
    ) {
        let result = derive(&books, "", &filters);
        prop_assert!(result.len() <= books.len());
        for book in &result {
            prop_assert!(filters.matches(book));
        }
        let expected = books.iter().filter(|book| filters.matches(book)).count();
        prop_assert_eq!(result.len(), expected);
    }

    #[test]
    fn pages_sort_is_non_increasing(books in prop::collection::vec(arb_book(), 0..30)) {
        let result = derive(&books, "", &sorted_by(SortKey::Pages));
        let counts: Vec<u32> = result.iter().map(|b| b.page_count().unwrap_or(0)).collect();
        prop_assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
