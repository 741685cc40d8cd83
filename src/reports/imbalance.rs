//! Imbalance Check
//!
//! GnuCash parks the unbalanced side of imported or hand-entered
//! transactions in an `Imbalance-<currency>` account. Any split in that
//! account means something needs fixing.

use tracing::info;

use crate::models::Book;

/// Result of looking at the imbalance account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImbalanceStatus {
    /// Account name that was checked
    pub account: String,
    /// Whether any account with that name exists in the book
    pub account_found: bool,
    /// Splits found in the matching accounts
    pub split_count: usize,
}

impl ImbalanceStatus {
    /// Count the splits posted to accounts named `account`
    pub fn check(book: &Book, account: &str) -> Self {
        let ids = book.find_accounts_by_name(account);
        let split_count = ids.iter().map(|id| book.account(*id).splits.len()).sum();

        info!(account, found = !ids.is_empty(), splits = split_count, "imbalance check");
        Self {
            account: account.to_string(),
            account_found: !ids.is_empty(),
            split_count,
        }
    }

    /// Whether anything needs attention
    pub fn has_transactions(&self) -> bool {
        self.split_count > 0
    }

    /// Notification text
    pub fn message(&self) -> String {
        if self.has_transactions() {
            format!(
                "Warning: {} Transactions were found in '{}' account",
                self.split_count, self.account
            )
        } else {
            format!("No Transactions Found in '{}' account", self.account)
        }
    }

    /// Notification subject line
    pub fn subject(&self) -> String {
        format!("'{}' Status", self.account)
    }
}
