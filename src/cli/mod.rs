//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the loader and report generators.

pub mod dump;
pub mod imbalance;
pub mod register;
pub mod summary;
pub mod tax;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::config::{ReportPaths, Settings};
use crate::error::ReportResult;
use crate::gnucash::load_book;
use crate::models::Book;

pub use dump::{handle_dump_command, DumpArgs};
pub use imbalance::{handle_imbalance_command, ImbalanceArgs};
pub use register::{handle_accounts_command, handle_register_command, RegisterArgs};
pub use summary::{handle_summary_command, SummaryArgs};
pub use tax::{handle_tax_command, TaxArgs};

/// Everything a command needs besides its own arguments
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub paths: ReportPaths,
    pub settings: Settings,
    /// `--book` from the command line
    pub book_override: Option<PathBuf>,
    /// The day reports are run for
    pub today: NaiveDate,
}

impl CommandContext {
    /// Path of the book this run reads
    pub fn book_path(&self) -> ReportResult<PathBuf> {
        self.settings.resolve_book(self.book_override.as_deref())
    }

    /// Load the book this run reads
    pub fn load_book(&self) -> ReportResult<Book> {
        load_book(self.book_path()?)
    }

    /// Directory reports are written to. The report writers create it.
    pub fn output_dir(&self, cli_override: Option<&Path>) -> ReportResult<PathBuf> {
        self.settings.resolve_reports_dir(cli_override)
    }
}
