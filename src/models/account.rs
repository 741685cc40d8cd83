//! Account model
//!
//! A node in the GnuCash chart of accounts. Accounts form a tree rooted at
//! the book's ROOT account; parent and child links are arena ids.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, Guid};
use super::transaction::SplitRef;

/// Type of account, as GnuCash names it in the `act:type` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Root,
    Bank,
    Cash,
    Credit,
    Asset,
    Liability,
    Stock,
    Mutual,
    Currency,
    Income,
    Expense,
    Equity,
    Receivable,
    Payable,
    Trading,
    Checking,
    Savings,
    MoneyMrkt,
    CreditLine,
    None,
}

impl AccountType {
    /// Stocks and mutual funds carry a share quantity next to the value
    pub fn is_security(&self) -> bool {
        matches!(self, Self::Stock | Self::Mutual)
    }

    /// Income, expense and equity accounts are left out of balance summaries
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Income | Self::Expense | Self::Equity)
    }

    /// The name GnuCash uses in the file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Bank => "BANK",
            Self::Cash => "CASH",
            Self::Credit => "CREDIT",
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Stock => "STOCK",
            Self::Mutual => "MUTUAL",
            Self::Currency => "CURRENCY",
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Equity => "EQUITY",
            Self::Receivable => "RECEIVABLE",
            Self::Payable => "PAYABLE",
            Self::Trading => "TRADING",
            Self::Checking => "CHECKING",
            Self::Savings => "SAVINGS",
            Self::MoneyMrkt => "MONEYMRKT",
            Self::CreditLine => "CREDITLINE",
            Self::None => "NONE",
        }
    }

    /// Parse account type from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let parsed = match s.trim().to_uppercase().as_str() {
            "ROOT" => Self::Root,
            "BANK" => Self::Bank,
            "CASH" => Self::Cash,
            "CREDIT" => Self::Credit,
            "ASSET" => Self::Asset,
            "LIABILITY" => Self::Liability,
            "STOCK" => Self::Stock,
            "MUTUAL" => Self::Mutual,
            "CURRENCY" => Self::Currency,
            "INCOME" => Self::Income,
            "EXPENSE" => Self::Expense,
            "EQUITY" => Self::Equity,
            "RECEIVABLE" => Self::Receivable,
            "PAYABLE" => Self::Payable,
            "TRADING" => Self::Trading,
            "CHECKING" => Self::Checking,
            "SAVINGS" => Self::Savings,
            "MONEYMRKT" => Self::MoneyMrkt,
            "CREDITLINE" => Self::CreditLine,
            "NONE" => Self::None,
            _ => return Option::None,
        };
        Some(parsed)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An account in the book
#[derive(Debug, Clone)]
pub struct Account {
    /// Arena id inside the owning book
    pub id: AccountId,

    /// Persistent GnuCash identifier
    pub guid: Guid,

    /// Account name (leaf name, not the full path)
    pub name: String,

    /// Type of account
    pub account_type: AccountType,

    /// Commodity mnemonic (`USD`, a ticker symbol, ...)
    pub commodity: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// Parent account; `None` only for the root
    pub parent: Option<AccountId>,

    /// Child accounts in file order
    pub children: Vec<AccountId>,

    /// Splits posted to this account, in file order
    pub splits: Vec<SplitRef>,
}

impl Account {
    /// Create a detached account with no links
    pub fn new(id: AccountId, guid: Guid, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id,
            guid,
            name: name.into(),
            account_type,
            commodity: None,
            description: None,
            parent: None,
            children: Vec::new(),
            splits: Vec::new(),
        }
    }

    /// Whether this account has sub-accounts
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether any split is posted to this account
    pub fn has_splits(&self) -> bool {
        !self.splits.is_empty()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}
