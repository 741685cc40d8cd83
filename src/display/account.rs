//! Account display formatting
//!
//! Formats accounts for terminal output as a table.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{AccountId, Book};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Full Name")]
    full_name: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Splits")]
    splits: usize,
}

/// Format the given accounts as a table, one row each
pub fn format_account_table(book: &Book, ids: &[AccountId]) -> String {
    if ids.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows = ids.iter().map(|id| {
        let account = book.account(*id);
        AccountRow {
            name: account.name.clone(),
            full_name: book.full_name(*id),
            account_type: account.account_type.to_string(),
            splits: account.splits.len(),
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}
