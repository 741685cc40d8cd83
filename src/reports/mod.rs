//! Reports module for gnucash-reports
//!
//! Each report is generated from a loaded [`Book`](crate::models::Book)
//! and the current date, then rendered as text, a workbook, or both.

pub mod account_dump;
pub mod account_summary;
pub mod imbalance;
pub mod tax_transactions;
pub mod transaction_register;

pub use account_dump::{AccountDump, DumpLine};
pub use account_summary::{AccountSummaryReport, SummaryRow};
pub use imbalance::ImbalanceStatus;
pub use tax_transactions::{
    load_account_list, parse_account_list, tax_window, TaxEntry, TaxGroup, TaxTransactionReport,
};
pub use transaction_register::{
    print_report, prior_balance_floor, register_candidates, EntryKind, RegisterEntry,
    RegisterQuery, TransactionRegister,
};
