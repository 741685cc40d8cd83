//! Tax-related transactions CLI command

use clap::Args;
use std::path::PathBuf;

use super::CommandContext;
use crate::error::ReportResult;
use crate::export::write_text_report;
use crate::reports::{load_account_list, TaxTransactionReport};

/// Arguments for `tax`
#[derive(Args, Debug, Default)]
pub struct TaxArgs {
    /// File listing tax-related account names, one per line
    #[arg(long)]
    pub accounts_file: Option<PathBuf>,

    /// Directory for the report and workbook
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Handle the tax command
pub fn handle_tax_command(ctx: &CommandContext, args: TaxArgs) -> ReportResult<()> {
    let list_path = ctx
        .settings
        .resolve_tax_accounts_file(args.accounts_file.as_deref())?;
    let accounts = load_account_list(&list_path)?;

    let book = ctx.load_book()?;
    let report = TaxTransactionReport::generate(&book, &accounts, ctx.today);
    println!("Report of {}", report.title());
    println!("Accounts to inspect are in '{}'", list_path.display());
    println!();

    let dir = ctx.output_dir(args.output_dir.as_deref())?;
    let stem = report.file_stem();

    let text_path = dir.join(format!("{}.txt", stem));
    write_text_report(&text_path, &report.format_text())?;
    println!("Report Successfully Saved to '{}'", text_path.display());

    let workbook_path = dir.join(format!("{}.xlsx", stem));
    report.export_workbook(&workbook_path)?;
    println!("Workbook successfully saved to '{}'", workbook_path.display());
    Ok(())
}
