//! Core data models for gnucash-reports
//!
//! This module contains the read-only ledger model the loader produces:
//! the book, its account tree, transactions and splits, and money amounts.

pub mod account;
pub mod book;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountType};
pub use book::{Book, Walk, ROOT_ACCOUNT_NAME};
pub use ids::{AccountId, Guid, TransactionId};
pub use money::Money;
pub use transaction::{Split, SplitRef, Transaction};
