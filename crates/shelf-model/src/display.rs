//! Human-readable renderings of record fields.

use chrono::DateTime;

use crate::book::Book;

/// Currencies formatted without a fractional part.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY"];

/// Map an ONIX contributor role code to a label.
///
/// Unknown codes are returned verbatim.
#[must_use]
pub fn author_role_label(role: Option<&str>) -> Option<&str> {
    let role = role?;
    let label = match role {
        "A01" => "Author",
        "A02" => "Co-author",
        "A03" => "Lead author",
        "B01" => "Editor",
        "B02" => "Co-editor",
        "E07" => "Narrator",
        "A12" => "Illustrator",
        "A13" => "Photographer",
        "B06" => "Translator",
        other => other,
    };
    Some(label)
}

impl Book {
    /// Price with its currency code, or `None` for free or unpriced books.
    #[must_use]
    pub fn formatted_price(&self) -> Option<String> {
        if self.is_free {
            return None;
        }
        let price = self.price.as_ref()?;
        let major = price.amount as f64 / 100.0;
        if ZERO_DECIMAL_CURRENCIES.contains(&price.currency.as_str()) {
            Some(format!("{major:.0} {}", price.currency))
        } else {
            Some(format!("{major:.2} {}", price.currency))
        }
    }

    /// Publication date as a long UTC date, e.g. "March 14, 2019".
    #[must_use]
    pub fn formatted_publication_date(&self) -> Option<String> {
        let timestamp = self.publication_date?;
        let date = DateTime::from_timestamp(timestamp, 0)?;
        Some(date.format("%B %-d, %Y").to_string())
    }
}
