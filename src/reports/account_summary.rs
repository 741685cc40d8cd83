//! Account Summary Report
//!
//! Rolls up the balance of every asset and liability account tree as of a
//! given day. Heading rows mark zero-value parent accounts, balance rows
//! carry the account value and, for stocks and mutual funds, the share
//! count and price per share.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::display::{file_date_prefix, us_date};
use crate::error::ReportResult;
use crate::export::{set_column_widths, write_headers, write_workbook};
use crate::models::{Account, AccountId, AccountType, Book, Money};

/// One line of the summary
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryRow {
    /// A parent account with no value of its own
    Heading {
        /// Depth below the top-level account that started the walk (>= 1)
        level: usize,
        name: String,
    },
    /// An account with a non-zero balance
    Balance {
        level: usize,
        name: String,
        value: Money,
        /// Share count for stock and mutual fund accounts
        shares: Option<Decimal>,
        /// Value per share for stock and mutual fund accounts
        share_price: Option<Decimal>,
    },
}

impl SummaryRow {
    /// Heading label as it appears in the sheet: indented by depth
    pub fn indented_name(&self) -> String {
        match self {
            Self::Heading { level, name } | Self::Balance { level, name, .. } => {
                format!("{}{}", " ".repeat(level + 1), name)
            }
        }
    }
}

/// Account Summary Report
#[derive(Debug, Clone)]
pub struct AccountSummaryReport {
    /// Day the balances are current to; later splits are left out
    pub as_of: NaiveDate,
    /// Rows in output order
    pub rows: Vec<SummaryRow>,
    /// Sum of every visited account's value, including omitted rows
    pub total_value: Money,
    /// Number of accounts walked
    pub accounts_processed: usize,
    /// Future-dated splits left out of the balances
    pub future_splits_skipped: usize,
}

/// Traversal state threaded through the recursive walk
struct SummaryWalk<'a> {
    book: &'a Book,
    today: NaiveDate,
    visited: HashSet<AccountId>,
    rows: Vec<SummaryRow>,
    total: Money,
    processed: usize,
    future_skipped: usize,
}

impl<'a> SummaryWalk<'a> {
    fn new(book: &'a Book, today: NaiveDate) -> Self {
        Self {
            book,
            today,
            visited: HashSet::new(),
            rows: Vec::new(),
            total: Money::zero(),
            processed: 0,
            future_skipped: 0,
        }
    }

    /// Whether the breadth-first pass should start a walk at `account`
    fn is_candidate(&self, account: &Account) -> bool {
        account.id != self.book.root()
            && !account.account_type.is_nominal()
            && account.has_children()
            && !self.visited.contains(&account.id)
    }

    fn visit(&mut self, level: usize, id: AccountId) {
        self.processed += 1;
        self.visited.insert(id);

        let book = self.book;
        let account = book.account(id);
        if account.account_type == AccountType::Expense {
            return;
        }

        let level = level + 1;
        for &child_id in &account.children {
            if self.visited.contains(&child_id) {
                continue;
            }
            let child = book.account(child_id);
            let (value, quantity) = self.balance(child);
            self.total += value;

            let security = child.account_type.is_security();
            if security && quantity.is_zero() {
                debug!(account = %child.name, "no shares held, row omitted");
            } else if value.is_zero() && !child.has_children() {
                debug!(account = %child.name, "zero value leaf, row omitted");
            } else if !value.is_zero() {
                let (shares, share_price) = if security {
                    let price = Decimal::new(value.cents(), 2).checked_div(quantity);
                    (Some(quantity), price)
                } else {
                    (None, None)
                };
                self.rows.push(SummaryRow::Balance {
                    level,
                    name: child.name.clone(),
                    value,
                    shares,
                    share_price,
                });
            } else if !security {
                self.rows.push(SummaryRow::Heading {
                    level,
                    name: child.name.clone(),
                });
            }

            self.visit(level, child_id);
        }
    }

    /// Value and quantity of the account's own splits dated on or before today
    fn balance(&mut self, account: &Account) -> (Money, Decimal) {
        let mut value = Money::zero();
        let mut quantity = Decimal::ZERO;
        for (txn, split) in self.book.splits(account.id) {
            if txn.is_future(self.today) {
                self.future_skipped += 1;
                debug!(
                    account = %account.name,
                    date = %txn.date_posted,
                    description = txn.description.as_deref().unwrap_or(""),
                    amount = %split.value,
                    "skipping future transaction"
                );
                continue;
            }
            value += split.value;
            quantity += split.quantity;
        }
        (value, quantity)
    }
}

impl AccountSummaryReport {
    /// Generate the summary for `book` as of `today`
    pub fn generate(book: &Book, today: NaiveDate) -> Self {
        let mut walk = SummaryWalk::new(book, today);

        for account in book.walk() {
            if !walk.is_candidate(account) {
                continue;
            }
            let parent = book.parent(account.id).map(|p| p.name.as_str()).unwrap_or("");
            info!(
                "Processing '{}' from '{}' with {} children",
                account.name,
                parent,
                account.children.len()
            );
            walk.visit(0, account.id);
        }

        info!("Completed processing {} accounts", walk.processed);

        Self {
            as_of: today,
            rows: walk.rows,
            total_value: walk.total,
            accounts_processed: walk.processed,
            future_splits_skipped: walk.future_skipped,
        }
    }

    /// Sheet and text title
    pub fn title(&self) -> String {
        format!("GnuCash Account Summary - Current to {}", us_date(self.as_of))
    }

    /// `YYYY-MM-DD_AccountSummary.xlsx`
    pub fn file_name(&self) -> String {
        format!("{}_AccountSummary.xlsx", file_date_prefix(self.as_of))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.title());
        output.push_str("\n\n");

        for row in &self.rows {
            match row {
                SummaryRow::Heading { .. } => {
                    output.push_str(row.indented_name().trim_end());
                }
                SummaryRow::Balance {
                    value,
                    shares,
                    share_price,
                    ..
                } => {
                    output.push_str(&format!(
                        "{:64} {:>14}",
                        row.indented_name(),
                        value.to_accounting()
                    ));
                    if let (Some(shares), Some(price)) = (shares, share_price) {
                        output.push_str(&format!(
                            " {:>14} {:>12}",
                            format!("{:.4}", shares),
                            format!("${:.4}", price)
                        ));
                    }
                }
            }
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&format!(
            "{:64} {:>14}\n",
            "TOTAL VALUE",
            self.total_value.to_accounting()
        ));
        output
    }

    /// Write the summary workbook to `path`
    pub fn export_workbook(&self, path: &Path) -> ReportResult<()> {
        write_workbook(path, |workbook, fmt| {
            let sheet = workbook.add_worksheet();
            sheet.set_name("GnuCash Accounts")?;
            set_column_widths(sheet, &[12.0, 48.0, 20.0, 16.0, 16.0])?;

            sheet.merge_range(0, 0, 0, 4, &self.title(), &fmt.title)?;
            write_headers(sheet, 1, 1, &["Account", "Balance", "Shares", "Share $"], &fmt.header)?;

            let mut row: u32 = 2;
            for entry in &self.rows {
                match entry {
                    SummaryRow::Heading { .. } => {
                        sheet.write_string_with_format(row, 0, entry.indented_name(), &fmt.text)?;
                    }
                    SummaryRow::Balance {
                        name,
                        value,
                        shares,
                        share_price,
                        ..
                    } => {
                        sheet.write_string_with_format(row, 1, name, &fmt.text)?;
                        sheet.write_number_with_format(row, 2, value.to_f64(), &fmt.currency)?;
                        if let Some(shares) = shares {
                            let shares = shares.to_f64().unwrap_or_default();
                            sheet.write_number_with_format(row, 3, shares, &fmt.shares)?;
                        }
                        if let Some(price) = share_price {
                            let price = price.to_f64().unwrap_or_default();
                            sheet.write_number_with_format(row, 4, price, &fmt.share_price)?;
                        }
                    }
                }
                row += 1;
            }

            row += 1;
            sheet.write_string_with_format(row, 1, "TOTAL VALUE", &fmt.header)?;
            sheet.write_number_with_format(row, 2, self.total_value.to_f64(), &fmt.bold_currency)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnucash::fixtures::{date, sample_book};
    use crate::models::Split;
    use tempfile::TempDir;

    fn names(report: &AccountSummaryReport) -> Vec<String> {
        report.rows.iter().map(|r| r.indented_name()).collect()
    }

    #[test]
    fn test_sample_book_summary() {
        let book = sample_book();
        let report = AccountSummaryReport::generate(&book, date(2024, 12, 31));

        assert_eq!(
            names(&report),
            vec![
                "  Current Assets",
                "   Checking Account",
                "  Investments",
                "   Brokerage",
                "    Index Fund",
                "  Credit Card",
            ]
        );
        assert!(matches!(report.rows[0], SummaryRow::Heading { level: 1, .. }));
        assert_eq!(report.total_value.cents(), 261655);
        assert_eq!(report.accounts_processed, 10);
        assert_eq!(report.future_splits_skipped, 1);
    }

    #[test]
    fn test_future_splits_are_excluded() {
        let book = sample_book();
        let report = AccountSummaryReport::generate(&book, date(2024, 12, 31));
        let checking = report
            .rows
            .iter()
            .find_map(|r| match r {
                SummaryRow::Balance { name, value, .. } if name == "Checking Account" => {
                    Some(*value)
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(checking.cents(), 242655);

        let later = AccountSummaryReport::generate(&book, date(2099, 1, 1));
        assert_eq!(later.total_value.cents(), 261655 + 99999);
        assert_eq!(later.future_splits_skipped, 0);
    }

    #[test]
    fn test_security_rows_carry_shares_and_price() {
        let book = sample_book();
        let report = AccountSummaryReport::generate(&book, date(2024, 12, 31));
        let fund = report
            .rows
            .iter()
            .find(|r| matches!(r, SummaryRow::Balance { name, .. } if name == "Index Fund"))
            .unwrap();
        match fund {
            SummaryRow::Balance {
                shares,
                share_price,
                ..
            } => {
                assert_eq!(*shares, Some(Decimal::new(25, 1)));
                assert_eq!(*share_price, Some(Decimal::new(400, 0)));
            }
            _ => unreachable!(),
        }
        // Sold-out stock has no row
        assert!(!names(&report).iter().any(|n| n.contains("Old Stock")));
    }

    #[test]
    fn test_zero_value_leaf_is_omitted() {
        let book = sample_book();
        let report = AccountSummaryReport::generate(&book, date(2024, 12, 31));
        assert!(!names(&report).iter().any(|n| n.contains("Savings")));
    }

    #[test]
    fn test_nominal_trees_are_not_walked() {
        let mut book = Book::new();
        let expenses = book.add_account(book.root(), "Expenses", AccountType::Expense);
        let food = book.add_account(expenses, "Food", AccountType::Expense);
        let assets = book.add_account(book.root(), "Assets", AccountType::Asset);
        let cash = book.add_account(assets, "Cash", AccountType::Cash);
        book.post(
            date(2024, 1, 1),
            "Lunch",
            vec![
                Split::new(food, Money::from_cents(1500)),
                Split::new(cash, Money::from_cents(-1500)),
            ],
        )
        .unwrap();

        let report = AccountSummaryReport::generate(&book, date(2024, 6, 1));
        assert_eq!(names(&report), vec!["  Cash"]);
        assert_eq!(report.total_value.cents(), -1500);
        assert_eq!(report.accounts_processed, 2);
    }

    #[test]
    fn test_empty_fund_still_walks_its_children() {
        let mut book = Book::new();
        let assets = book.add_account(book.root(), "Assets", AccountType::Asset);
        let fund = book.add_account(assets, "Fund", AccountType::Mutual);
        let shares = book.add_account(fund, "Fund Shares", AccountType::Stock);
        let equity = book.add_account(book.root(), "Opening", AccountType::Equity);
        book.post(
            date(2024, 1, 1),
            "Buy",
            vec![
                Split::with_quantity(shares, Money::from_cents(100000), Decimal::new(10, 0)),
                Split::new(equity, Money::from_cents(-100000)),
            ],
        )
        .unwrap();

        let report = AccountSummaryReport::generate(&book, date(2024, 6, 1));
        assert_eq!(names(&report), vec!["   Fund Shares"]);
        assert!(report
            .rows
            .iter()
            .all(|r| matches!(r, SummaryRow::Balance { .. })));
        assert_eq!(report.total_value.cents(), 100000);
        assert_eq!(report.accounts_processed, 3);
    }

    #[test]
    fn test_format_terminal() {
        let book = sample_book();
        let report = AccountSummaryReport::generate(&book, date(2024, 12, 31));
        let output = report.format_terminal();

        assert!(output.starts_with("GnuCash Account Summary - Current to 12/31/2024\n\n"));
        assert!(output.contains(&format!("{:64} {:>14}", "   Checking Account", "$2,426.55")));
        assert!(output.contains(&format!("{:64} {:>14}", "  Credit Card", "($810.00)")));
        assert!(output.contains("2.5000"));
        assert!(output.contains("$400.0000"));
        assert!(output.trim_end().ends_with("$2,616.55"));
    }

    #[test]
    fn test_export_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let book = sample_book();
        let report = AccountSummaryReport::generate(&book, date(2024, 12, 31));
        assert_eq!(report.file_name(), "2024-12-31_AccountSummary.xlsx");

        let path = temp_dir.path().join(report.file_name());
        report.export_workbook(&path).unwrap();
        assert!(path.exists());
    }
}
