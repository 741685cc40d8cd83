//! Transaction model
//!
//! A dated, described group of balanced splits. Each split moves `value`
//! (in the transaction currency) through exactly one account; `quantity`
//! is the same movement in the account's own commodity, which for stock and
//! mutual-fund accounts is a share count.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::ids::{AccountId, Guid, TransactionId};
use super::money::Money;

/// One line item of a transaction
#[derive(Debug, Clone)]
pub struct Split {
    /// The account this split posts to
    pub account: AccountId,

    /// Signed value in the transaction currency
    pub value: Money,

    /// Signed amount in the account commodity (shares for securities)
    pub quantity: Decimal,

    /// Optional memo for this split
    pub memo: Option<String>,
}

impl Split {
    /// Create a split with equal value and quantity
    pub fn new(account: AccountId, value: Money) -> Self {
        Self {
            account,
            value,
            quantity: Decimal::new(value.cents(), 2),
            memo: None,
        }
    }

    /// Create a split carrying a separate share quantity
    pub fn with_quantity(account: AccountId, value: Money, quantity: Decimal) -> Self {
        Self {
            account,
            value,
            quantity,
            memo: None,
        }
    }
}

/// Handle from an account to one of its splits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRef {
    /// Transaction holding the split
    pub transaction: TransactionId,
    /// Position of the split inside the transaction
    pub index: usize,
}

/// A ledger transaction
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Arena id inside the owning book
    pub id: TransactionId,

    /// Persistent GnuCash identifier
    pub guid: Guid,

    /// Posting date (calendar date in the offset written to the file)
    pub date_posted: NaiveDate,

    /// Check or reference number
    pub num: Option<String>,

    /// Description shown in the register
    pub description: Option<String>,

    /// Balanced line items
    pub splits: Vec<Split>,
}

impl Transaction {
    /// Create a transaction with no splits
    pub fn new(id: TransactionId, guid: Guid, date_posted: NaiveDate) -> Self {
        Self {
            id,
            guid,
            date_posted,
            num: None,
            description: None,
            splits: Vec::new(),
        }
    }

    /// Whether the posting date lies after `today`
    pub fn is_future(&self, today: NaiveDate) -> bool {
        self.date_posted > today
    }
}
