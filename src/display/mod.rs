//! Display formatting for terminal output
//!
//! Shared text helpers for the fixed-width reports and table output for
//! account listings.

pub mod account;
pub mod report;

pub use account::format_account_table;
pub use report::{centered, file_date_prefix, or_none_marker, parse_user_date, us_date, word_chars};
