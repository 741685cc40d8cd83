//! Tax-Related Transactions Report
//!
//! Collects every transaction posted to a list of tax-related accounts
//! inside the tax window, grouped and totaled per account.

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::Formula;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::display::{centered, file_date_prefix, us_date};
use crate::error::{ReportError, ReportResult};
use crate::export::{set_column_widths, write_headers, write_workbook};
use crate::models::{Book, Money, Transaction};

/// Read a tax account list: one name per line, trimmed, blank lines skipped
pub fn load_account_list(path: &Path) -> ReportResult<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ReportError::Io(format!(
            "Failed to read account list {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_account_list(&contents))
}

/// Parse the contents of a tax account list
pub fn parse_account_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Reporting window for a run on `today`.
///
/// January through April report on the whole previous year; later in the
/// year the window runs from January 1 through today.
pub fn tax_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    if today.month() <= 4 {
        let year = today.year() - 1;
        (ymd(year, 1, 1), ymd(year, 12, 31))
    } else {
        (ymd(today.year(), 1, 1), today)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// One payment into a tax-related account
#[derive(Debug, Clone, PartialEq)]
pub struct TaxEntry {
    /// Tax-related account the split was found in
    pub tax_account: String,
    /// Account the money came from
    pub pay_account: String,
    pub date: NaiveDate,
    pub num: Option<String>,
    pub description: Option<String>,
    pub amount: Money,
}

impl TaxEntry {
    /// Build the entry for `txn` as seen from `tax_account`.
    ///
    /// The paying account is the last split on another account with a
    /// negative value; the amount is the last positive split on the tax
    /// account itself.
    fn from_transaction(book: &Book, tax_account: &str, txn: &Transaction) -> Self {
        let mut pay_account = tax_account;
        let mut amount = Money::zero();
        for split in &txn.splits {
            let name = book.account(split.account).name.as_str();
            if name != tax_account && split.value.is_negative() {
                pay_account = name;
            }
            if name == tax_account && split.value.is_positive() {
                amount = split.value;
            }
        }
        Self {
            tax_account: tax_account.to_string(),
            pay_account: pay_account.to_string(),
            date: txn.date_posted,
            num: txn.num.clone(),
            description: txn.description.clone(),
            amount,
        }
    }
}

/// Entries for one tax account with their total
#[derive(Debug, Clone)]
pub struct TaxGroup {
    pub tax_account: String,
    pub entries: Vec<TaxEntry>,
    pub total: Money,
}

/// Tax-Related Transactions Report
#[derive(Debug, Clone)]
pub struct TaxTransactionReport {
    /// Day the report was run
    pub run_date: NaiveDate,
    /// First day of the window (inclusive)
    pub start: NaiveDate,
    /// Last day of the window (inclusive)
    pub end: NaiveDate,
    /// Groups ordered by tax account name
    pub groups: Vec<TaxGroup>,
}

impl TaxTransactionReport {
    /// Generate the report for the accounts named in `tax_accounts`
    pub fn generate(book: &Book, tax_accounts: &[String], today: NaiveDate) -> Self {
        let (start, end) = tax_window(today);
        let wanted: HashSet<&str> = tax_accounts.iter().map(String::as_str).collect();

        let mut entries = Vec::new();
        for account in book.walk() {
            if !account.has_splits() || !wanted.contains(account.name.as_str()) {
                continue;
            }
            debug!(account = %book.full_name(account.id), "inspecting tax account");
            for (txn, _) in book.splits(account.id) {
                if (start..=end).contains(&txn.date_posted) {
                    entries.push(TaxEntry::from_transaction(book, &account.name, txn));
                }
            }
        }

        entries.sort_by(|a, b| (&a.tax_account, a.date).cmp(&(&b.tax_account, b.date)));
        info!(
            entries = entries.len(),
            "found tax-related transactions from {} through {}", start, end
        );

        Self {
            run_date: today,
            start,
            end,
            groups: group_entries(entries),
        }
    }

    /// Report title, including the program version
    pub fn title(&self) -> String {
        format!(
            "Tax-Related Transactions from {} through {} - v{}",
            us_date(self.start),
            us_date(self.end),
            env!("CARGO_PKG_VERSION")
        )
    }

    /// `YYYY-MM-DD_TaxRelatedTransactionReport`, shared by the text and workbook files
    pub fn file_stem(&self) -> String {
        format!("{}_TaxRelatedTransactionReport", file_date_prefix(self.run_date))
    }

    /// Total number of entries across all groups
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// Render the fixed-width text report
    pub fn format_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&centered(&self.title(), 90));
        output.push_str("\n\n");
        output.push_str(&format!(
            "{:^28} {:^12} {:^6} {:^32} {:>12}\n",
            "PAYMENT ACCOUNT", "DATE", "NUM", "DESCRIPTION", "AMOUNT"
        ));
        output.push_str(&format!(
            "{:^28} {:^12} {:^6} {:^32} {:>12}\n",
            "---------------", "----", "---", "-----------", "------"
        ));

        for group in &self.groups {
            for entry in &group.entries {
                output.push_str(&format!(
                    "{:28} {:^12} {:^6} {:<32} {:>12}\n",
                    entry.pay_account,
                    us_date(entry.date),
                    entry.num.as_deref().unwrap_or(""),
                    entry.description.as_deref().unwrap_or(""),
                    entry.amount.to_accounting_padded()
                ));
            }
            output.push_str(&format!(
                "{:28} {:^12} {:^6} {:>32} {:>12}\n\n",
                " ",
                " ",
                " ",
                format!("--- {} TOTAL:", group.tax_account),
                group.total.to_accounting_padded()
            ));
        }
        output
    }

    /// Write the workbook version of the report to `path`
    pub fn export_workbook(&self, path: &Path) -> ReportResult<()> {
        write_workbook(path, |workbook, fmt| {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Tax Related Transactions")?;
            set_column_widths(sheet, &[32.0, 28.0, 12.0, 6.0, 32.0, 16.0])?;

            sheet.merge_range(0, 0, 0, 5, &self.title(), &fmt.title)?;
            write_headers(
                sheet,
                2,
                0,
                &["TAX ACCOUNT", "PAY ACCOUNT", "DATE", "NUM", "DESCRIPTION", "AMOUNT"],
                &fmt.header,
            )?;

            let mut row: u32 = 3;
            for (index, group) in self.groups.iter().enumerate() {
                if index > 0 {
                    row += 1;
                }
                let first = row;
                for entry in &group.entries {
                    sheet.write_string_with_format(row, 0, &entry.tax_account, &fmt.text)?;
                    sheet.write_string_with_format(row, 1, &entry.pay_account, &fmt.text)?;
                    sheet.write_string_with_format(row, 2, us_date(entry.date), &fmt.center)?;
                    sheet.write_string_with_format(
                        row,
                        3,
                        entry.num.as_deref().unwrap_or(""),
                        &fmt.center,
                    )?;
                    sheet.write_string_with_format(
                        row,
                        4,
                        entry.description.as_deref().unwrap_or(""),
                        &fmt.text,
                    )?;
                    sheet.write_number_with_format(row, 5, entry.amount.to_f64(), &fmt.currency)?;
                    row += 1;
                }

                // Spreadsheet rows are one-based in formulas
                let formula = Formula::new(format!("=SUM(F{}:F{})", first + 1, row))
                    .set_result(format!("{:.2}", group.total.to_f64()));
                sheet.write_string_with_format(row, 4, "TOTAL:", &fmt.bold_right)?;
                sheet.write_formula_with_format(row, 5, formula, &fmt.bold_currency)?;
                row += 1;
            }
            Ok(())
        })
    }
}

/// Split sorted entries into runs sharing a tax account
fn group_entries(entries: Vec<TaxEntry>) -> Vec<TaxGroup> {
    let mut groups: Vec<TaxGroup> = Vec::new();
    for entry in entries {
        match groups.last_mut() {
            Some(group) if group.tax_account == entry.tax_account => {
                group.total += entry.amount;
                group.entries.push(entry);
            }
            _ => groups.push(TaxGroup {
                tax_account: entry.tax_account.clone(),
                total: entry.amount,
                entries: vec![entry],
            }),
        }
    }
    groups
}
