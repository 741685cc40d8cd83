//! GnuCash file access
//!
//! Reads the XML flavour of a GnuCash book (plain or gzip-compressed) into
//! the in-memory [`Book`](crate::models::Book) the reports work on.

pub mod loader;

pub use loader::{load_book, parse_book};

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared sample book for unit tests

    use chrono::NaiveDate;

    use crate::models::Book;

    /// A small book: bank, credit, fund and stock accounts, tax-related
    /// expenses, one future-dated paycheck and one imbalance split
    pub const SAMPLE_BOOK: &str = include_str!("../../tests/fixtures/sample.gnucash");

    pub fn sample_book() -> Book {
        super::parse_book(SAMPLE_BOOK.as_bytes()).unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
}
