//! gnucash-reports - reports from GnuCash XML books
//!
//! This library reads a GnuCash book (plain or gzip-compressed XML) into an
//! in-memory account tree and produces the reports built on it: an account
//! summary, a tax transaction report, a transaction register, an imbalance
//! check and an account dump.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Book, accounts, transactions and money
//! - `gnucash`: XML book loader
//! - `reports`: Report generators
//! - `display`: Terminal and fixed-width text formatting
//! - `export`: Text and XLSX output files
//! - `notify`: Email notifications
//! - `cli`: Command handlers
//! - `tui`: Interactive transaction register
//!
//! # Example
//!
//! ```rust,ignore
//! use gnucash_reports::gnucash::load_book;
//! use gnucash_reports::reports::AccountSummaryReport;
//!
//! let book = load_book("finances.gnucash")?;
//! let report = AccountSummaryReport::generate(&book, chrono::Local::now().date_naive());
//! println!("{}", report.format_terminal());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod gnucash;
pub mod logging;
pub mod models;
pub mod notify;
pub mod reports;
pub mod tui;

pub use error::{ReportError, ReportResult};
