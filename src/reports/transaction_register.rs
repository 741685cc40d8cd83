//! Transaction Register Report
//!
//! Lists the transactions of one account between two dates, with an
//! optional opening line for everything posted before the start date and a
//! closing line holding the running total.

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::ExcelDateTime;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use crate::display::{centered, file_date_prefix, us_date, word_chars};
use crate::error::{ReportError, ReportResult};
use crate::export::{set_column_widths, write_headers, write_workbook};
use crate::models::{AccountId, AccountType, Book, Money};

/// Date the prior balance is dated at when nothing precedes the window
pub fn prior_balance_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Names offered in the account picker.
///
/// Every account of one of `types` contributes its child subtrees when it
/// has children, or itself when it is a leaf with splits. Inside a subtree
/// an account is listed when it has splits or is an expense account.
/// The result is sorted with duplicates removed.
pub fn register_candidates(book: &Book, types: &[AccountType]) -> Vec<String> {
    let mut names = Vec::new();
    for account in book.walk() {
        if !types.contains(&account.account_type) {
            continue;
        }
        if account.has_children() {
            for &child in &account.children {
                collect_subtree(book, child, &mut names);
            }
        } else if account.has_splits() {
            collect_subtree(book, account.id, &mut names);
        }
    }
    names.sort();
    names.dedup();
    names
}

fn collect_subtree(book: &Book, id: AccountId, names: &mut Vec<String>) {
    let account = book.account(id);
    if account.has_splits() || account.account_type == AccountType::Expense {
        names.push(account.name.clone());
    }
    for &child in &account.children {
        collect_subtree(book, child, names);
    }
}

/// What to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterQuery {
    /// Account name; every account with this name contributes
    pub account: String,
    /// First day listed (inclusive)
    pub start: NaiveDate,
    /// Last day listed (inclusive)
    pub end: NaiveDate,
    /// Whether to add a line for the balance before `start`
    pub include_prior_balance: bool,
}

/// Kind of register line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Transaction,
    PriorBalance,
    CurrentBalance,
}

/// One register line
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterEntry {
    pub kind: EntryKind,
    pub date: NaiveDate,
    pub num: Option<String>,
    pub description: Option<String>,
    pub amount: Money,
}

impl RegisterEntry {
    fn balance(kind: EntryKind, date: NaiveDate, amount: Money) -> Self {
        Self {
            kind,
            date,
            num: None,
            description: None,
            amount,
        }
    }

    /// Check number with GnuCash's "0" placeholder hidden
    pub fn display_num(&self) -> &str {
        match self.num.as_deref() {
            Some("0") | None => "",
            Some(num) => num,
        }
    }

    /// Description column text; balance lines are right-aligned labels
    pub fn display_description(&self) -> String {
        match self.kind {
            EntryKind::Transaction => self.description.clone().unwrap_or_default(),
            EntryKind::PriorBalance => format!("{:>80}", "-- PRIOR BALANCE --"),
            EntryKind::CurrentBalance => format!("{:>80}", "-- CURRENT BALANCE/TOTAL --"),
        }
    }
}

/// Transaction Register Report
#[derive(Debug, Clone)]
pub struct TransactionRegister {
    pub query: RegisterQuery,
    /// Day the report was produced, used in file names
    pub run_date: NaiveDate,
    /// Sum of splits dated before the window
    pub prior_balance: Money,
    /// Latest date among those splits, or 2000-01-01
    pub prior_balance_date: NaiveDate,
    /// Lines in output order, ending with the current balance
    pub entries: Vec<RegisterEntry>,
}

impl TransactionRegister {
    /// Generate the register for `query`
    pub fn generate(book: &Book, query: &RegisterQuery, today: NaiveDate) -> ReportResult<Self> {
        if query.start > query.end {
            return Err(ReportError::Validation(format!(
                "Start date {} is after end date {}",
                query.start, query.end
            )));
        }

        let accounts = book.find_accounts_by_name(&query.account);
        if accounts.is_empty() {
            return Err(ReportError::account_not_found(&query.account));
        }

        let mut prior_balance = Money::zero();
        let mut prior_balance_date = prior_balance_floor();
        let mut entries = Vec::new();

        for id in accounts {
            debug!(account = %book.full_name(id), "collecting register splits");
            for (txn, split) in book.splits(id) {
                let date = txn.date_posted;
                if date < query.start {
                    prior_balance += split.value;
                    if date > prior_balance_date {
                        prior_balance_date = date;
                    }
                } else if date <= query.end {
                    entries.push(RegisterEntry {
                        kind: EntryKind::Transaction,
                        date,
                        num: txn.num.clone(),
                        description: txn.description.clone(),
                        amount: split.value,
                    });
                }
            }
        }

        if query.include_prior_balance {
            entries.push(RegisterEntry::balance(
                EntryKind::PriorBalance,
                prior_balance_date,
                prior_balance,
            ));
        }
        entries.sort_by_key(|e| (e.date, e.amount));

        let current: Money = entries.iter().map(|e| e.amount).sum();
        entries.push(RegisterEntry::balance(
            EntryKind::CurrentBalance,
            prior_balance_date,
            current,
        ));

        info!(
            account = %query.account,
            lines = entries.len(),
            "register from {} through {}", query.start, query.end
        );

        Ok(Self {
            query: query.clone(),
            run_date: today,
            prior_balance,
            prior_balance_date,
            entries,
        })
    }

    /// Amount on the closing line
    pub fn current_balance(&self) -> Money {
        self.entries.last().map(|e| e.amount).unwrap_or_default()
    }

    /// Transaction lines only, without the balance lines
    pub fn transactions(&self) -> impl Iterator<Item = &RegisterEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Transaction)
    }

    /// `YYYY-MM-DD_<account word characters, 16 max>_Transactions`
    pub fn file_stem(&self) -> String {
        format!(
            "{}_{}_Transactions",
            file_date_prefix(self.run_date),
            word_chars(&self.query.account, 16)
        )
    }

    /// Render the fixed-width text report
    pub fn format_text(&self) -> String {
        let title = format!("Transaction Report from Account '{}'", self.query.account);
        let mut output = String::new();
        output.push_str(&centered(&title, 112));
        output.push_str("\n\n");
        output.push_str(&format!(
            "{:^12} {:^6} {:80} {:^14}\n",
            "DATE", "NUM", "DESCRIPTION", "AMOUNT"
        ));
        output.push_str(&format!(
            "{:^12} {:^6} {:80} {:^14}\n",
            "----", "---", "-----------", "------"
        ));

        for entry in &self.entries {
            output.push_str(&format!(
                "{:12} {:^6} {:80} {:>14}\n",
                us_date(entry.date),
                entry.display_num(),
                entry.display_description(),
                entry.amount.to_accounting_padded()
            ));
        }
        output
    }

    /// Write the workbook version of the report to `path`
    pub fn export_workbook(&self, path: &Path) -> ReportResult<()> {
        let title = format!("Transaction Report from '{}'", self.query.account);
        write_workbook(path, |workbook, fmt| {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Transaction Report")?;
            set_column_widths(sheet, &[12.0, 10.0, 80.0, 16.0])?;

            sheet.merge_range(0, 0, 0, 3, &title, &fmt.title)?;
            write_headers(sheet, 2, 0, &["DATE", "NUM", "DESCRIPTION", "AMOUNT"], &fmt.header)?;

            let mut row: u32 = 3;
            for entry in &self.entries {
                let date = ExcelDateTime::from_ymd(
                    entry.date.year() as u16,
                    entry.date.month() as u8,
                    entry.date.day() as u8,
                )?;
                sheet.write_datetime_with_format(row, 0, &date, &fmt.date)?;
                sheet.write_string_with_format(row, 1, entry.display_num(), &fmt.center)?;
                sheet.write_string_with_format(row, 2, entry.display_description(), &fmt.text)?;
                sheet.write_number_with_format(row, 3, entry.amount.to_f64(), &fmt.currency)?;
                row += 1;
            }
            Ok(())
        })
    }
}

/// Send a saved report to the printer with `command`, appending the path
pub fn print_report(command: &str, path: &Path) -> ReportResult<()> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ReportError::Config("print_command is empty".into()))?;

    debug!(command, path = %path.display(), "printing report");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| ReportError::Io(format!("Failed to run '{}': {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(ReportError::Io(format!(
            "'{}' exited with {}",
            program, status
        )))
    }
}
