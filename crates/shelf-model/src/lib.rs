//! Catalog data model: books (forms), their authors and the shelves that
//! group them, as served by the catalog REST API.

pub mod book;
pub mod display;
pub mod shelf;

pub use book::{Author, Book, BookCan, BookExtents, BookInfo, BookPrice, BookSubjects};
pub use display::author_role_label;
pub use shelf::{Bookshelf, PaginationParams, User};
