//! Terminal rendering of shelves, pages and book details.

use chrono::DateTime;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use shelf_core::{FilterSet, VisibleShelf};
use shelf_model::{Book, Bookshelf, author_role_label};

const TABLE_WIDTH: u16 = 120;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
}

pub fn shelves_table(shelves: &[Bookshelf]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Title"),
        header_cell("Id"),
        header_cell("Owner"),
        header_cell("Last modified"),
    ]);
    apply_table_style(&mut table);
    for shelf in shelves {
        table.add_row(vec![
            Cell::new(&shelf.title).add_attribute(Attribute::Bold),
            dim_cell(&shelf.id),
            Cell::new(&shelf.user.name),
            Cell::new(format_timestamp(shelf.last_modified).unwrap_or_else(|| "-".to_string())),
        ]);
    }
    table
}

/// Table of the books on the visible page, numbered by overall position.
pub fn books_table(visible: &VisibleShelf<'_>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Title"),
        header_cell("Authors"),
        header_cell("Lang"),
        header_cell("Pages"),
        header_cell("Price"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    let first = visible.item_range.map_or(1, |(first, _)| first);
    for (offset, book) in visible.books.iter().enumerate() {
        table.add_row(vec![
            dim_cell(first + offset),
            title_cell(book),
            Cell::new(book.author_names()),
            Cell::new(&book.language),
            book.page_count().map_or_else(|| dim_cell("-"), Cell::new),
            price_cell(book),
        ]);
    }
    table
}

/// Key/value table for a single book.
pub fn book_table(book: &Book) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);

    let authors = book
        .authors
        .iter()
        .map(|author| match author_role_label(author.role.as_deref()) {
            Some(role) => format!("{} ({role})", author.name),
            None => author.name.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut rows: Vec<(&str, String)> = vec![
        ("Title", book.title.clone()),
        ("Id", book.id.clone()),
        ("Authors", authors),
    ];
    let optional = [
        ("Publisher", book.publisher.clone()),
        ("Published", book.formatted_publication_date()),
        ("ISBN", book.isbn.clone()),
        ("Pages", book.page_count().map(|pages| pages.to_string())),
        ("Price", price_label(book)),
    ];
    rows.extend(
        optional
            .into_iter()
            .filter_map(|(label, value)| value.map(|value| (label, value))),
    );
    if !book.language.is_empty() {
        rows.push(("Language", book.language.clone()));
    }
    rows.push(("Sample", yes_no(book.can_sample()).to_string()));
    rows.push(("Buy", yes_no(book.can_buy()).to_string()));
    if book.adult {
        rows.push(("Adult", "yes".to_string()));
    }
    if let Some(description) = &book.description {
        rows.push(("Description", description.clone()));
    }

    for (label, value) in rows {
        table.add_row(vec![header_cell(label), Cell::new(value)]);
    }
    table
}

/// One-line description of the current results and load progress.
pub fn summary_line(visible: &VisibleShelf<'_>) -> String {
    if let Some(error) = visible.error {
        return format!("Loading failed: {error}. Run the command again to retry.");
    }
    let progress = if visible.in_flight {
        format!("{}/{} loaded, loading...", visible.loaded_count, visible.requested)
    } else {
        format!("{} loaded", visible.loaded_count)
    };

    match visible.item_range {
        Some((first, last)) => {
            let matching = if visible.is_filtered { " matching" } else { "" };
            format!(
                "Showing {first}-{last} of {}{matching} books ({progress})",
                visible.total_results
            )
        }
        None if visible.is_filtered => {
            format!("No books match the current search and filters ({progress})")
        }
        None => format!("No books on this shelf ({progress})"),
    }
}

/// Page position and active sort.
pub fn footer_line(visible: &VisibleShelf<'_>, filters: &FilterSet) -> String {
    format!(
        "Page {} of {} · sorted by {}",
        visible.page_index, visible.total_pages, filters.sort_by
    )
}

pub fn languages_line(languages: &[String]) -> Option<String> {
    (!languages.is_empty()).then(|| format!("Languages: {}", languages.join(", ")))
}

fn price_label(book: &Book) -> Option<String> {
    if book.is_free {
        Some("Free".to_string())
    } else {
        book.formatted_price()
    }
}

fn price_cell(book: &Book) -> Cell {
    match price_label(book) {
        Some(label) if book.is_free => Cell::new(label).fg(Color::Green),
        Some(label) => Cell::new(label),
        None => dim_cell("-"),
    }
}

fn title_cell(book: &Book) -> Cell {
    let cell = Cell::new(&book.title).add_attribute(Attribute::Bold);
    if book.adult { cell.fg(Color::Red) } else { cell }
}

fn format_timestamp(seconds: i64) -> Option<String> {
    DateTime::from_timestamp(seconds, 0).map(|date| date.format("%Y-%m-%d").to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
