//! Account summary CLI command

use clap::Args;
use std::ffi::OsString;
use std::path::PathBuf;

use super::CommandContext;
use crate::error::ReportResult;
use crate::reports::AccountSummaryReport;

/// Arguments for `summary`
#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    /// Directory for the workbook (default: configured reports directory)
    ///
    /// An empty value also means the configured reports directory.
    #[arg(value_parser = clap::value_parser!(OsString))]
    pub directory: Option<OsString>,

    /// Print the summary as text instead of writing a workbook
    #[arg(long)]
    pub text: bool,
}

/// Handle the summary command
pub fn handle_summary_command(ctx: &CommandContext, args: SummaryArgs) -> ReportResult<()> {
    let book = ctx.load_book()?;
    let report = AccountSummaryReport::generate(&book, ctx.today);

    if args.text {
        print!("{}", report.format_terminal());
        return Ok(());
    }

    let directory = args.directory.map(PathBuf::from);
    let dir = ctx.output_dir(directory.as_deref())?;
    let path = dir.join(report.file_name());
    report.export_workbook(&path)?;

    println!("Completed processing {} accounts.", report.accounts_processed);
    println!("XLSX spreadsheet '{}' was created successfully.", path.display());
    Ok(())
}
