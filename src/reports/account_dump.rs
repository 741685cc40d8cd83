//! Account Dump
//!
//! Diagnostic listing of every account that carries splits, with an
//! optional split-by-split dump of the transactions touching selected
//! accounts.

use std::collections::HashSet;

use crate::display::{or_none_marker, us_date};
use crate::models::{AccountId, Book};

/// One listed account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLine {
    pub id: AccountId,
    pub full_name: String,
    pub account_type: String,
    pub children: usize,
    pub splits: usize,
}

/// Account Dump
#[derive(Debug, Clone)]
pub struct AccountDump {
    /// Accounts with splits, in walk order
    pub lines: Vec<DumpLine>,
    /// Account names whose transactions are dumped in detail
    pub selected: Vec<String>,
}

impl AccountDump {
    /// Collect every account that has splits
    pub fn generate(book: &Book, selected: &[String]) -> Self {
        let lines = book
            .walk()
            .filter(|a| a.has_splits())
            .map(|a| DumpLine {
                id: a.id,
                full_name: book.full_name(a.id),
                account_type: a.account_type.to_string(),
                children: a.children.len(),
                splits: a.splits.len(),
            })
            .collect();
        Self {
            lines,
            selected: selected.to_vec(),
        }
    }

    /// Render the listing, followed by split detail for selected accounts
    pub fn format_terminal(&self, book: &Book) -> String {
        let selected: HashSet<&str> = self.selected.iter().map(String::as_str).collect();
        let mut output = String::new();

        for line in &self.lines {
            output.push_str(&format!(
                "{:112} TYPE:{:16} #CH:{:4} #SP:{:4}\n",
                line.full_name, line.account_type, line.children, line.splits
            ));

            let account = book.account(line.id);
            if !selected.contains(account.name.as_str()) {
                continue;
            }
            for (txn, _) in book.splits(line.id) {
                output.push_str(&format!("ACC_NAME: {}\n", account.name));
                let count = txn.splits.len();
                for (index, split) in txn.splits.iter().enumerate() {
                    output.push_str(&format!(
                        "--TRX-SPLIT {} / {} : DATE: {}  NUM: {}  DESC: {}  SPL-ACCT: {}  AMT: {}\n",
                        index,
                        count,
                        us_date(txn.date_posted),
                        or_none_marker(txn.num.as_deref()),
                        or_none_marker(txn.description.as_deref()),
                        book.account(split.account).name,
                        split.value.to_decimal()
                    ));
                }
            }
        }
        output
    }
}
