//! Account dump CLI command

use clap::Args;
use std::path::PathBuf;

use super::CommandContext;
use crate::error::ReportResult;
use crate::reports::{load_account_list, AccountDump};

/// Arguments for `dump`
#[derive(Args, Debug, Default)]
pub struct DumpArgs {
    /// Account whose transactions are dumped split by split (repeatable)
    #[arg(short, long = "account")]
    pub accounts: Vec<String>,

    /// File listing more accounts to dump, one per line
    #[arg(long)]
    pub accounts_file: Option<PathBuf>,
}

/// Handle the dump command
pub fn handle_dump_command(ctx: &CommandContext, args: DumpArgs) -> ReportResult<()> {
    let mut selected = args.accounts;
    if let Some(path) = &args.accounts_file {
        selected.extend(load_account_list(path)?);
    }

    let book = ctx.load_book()?;
    let dump = AccountDump::generate(&book, &selected);
    print!("{}", dump.format_terminal(&book));
    Ok(())
}
