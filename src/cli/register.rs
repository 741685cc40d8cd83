//! Transaction register CLI commands

use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use super::CommandContext;
use crate::display::{format_account_table, parse_user_date};
use crate::error::{ReportError, ReportResult};
use crate::export::write_text_report;
use crate::reports::{
    print_report, prior_balance_floor, register_candidates, RegisterQuery, TransactionRegister,
};

/// Arguments for `register`
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account name (see `accounts` for the choices)
    #[arg(short, long)]
    pub account: String,

    /// First date listed, YYYY-MM-DD or MM/DD/YYYY (default 2000-01-01)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last date listed (default today)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Leave out the prior balance line
    #[arg(long)]
    pub no_prior_balance: bool,

    /// Save the text report
    #[arg(long)]
    pub report: bool,

    /// Save the workbook
    #[arg(long)]
    pub workbook: bool,

    /// Save the text report and send it to the printer
    #[arg(long)]
    pub print: bool,

    /// Directory for saved files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

fn parse_date_arg(value: Option<&str>, default: NaiveDate) -> ReportResult<NaiveDate> {
    match value {
        None => Ok(default),
        Some(raw) => parse_user_date(raw).ok_or_else(|| {
            ReportError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or MM/DD/YYYY",
                raw
            ))
        }),
    }
}

/// Handle the register command
pub fn handle_register_command(ctx: &CommandContext, args: RegisterArgs) -> ReportResult<()> {
    let query = RegisterQuery {
        account: args.account.clone(),
        start: parse_date_arg(args.start.as_deref(), prior_balance_floor())?,
        end: parse_date_arg(args.end.as_deref(), ctx.today)?,
        include_prior_balance: !args.no_prior_balance,
    };

    let book = ctx.load_book()?;
    let register = TransactionRegister::generate(&book, &query, ctx.today)?;

    let save_report = args.report || args.print;
    if !save_report && !args.workbook {
        print!("{}", register.format_text());
        return Ok(());
    }

    let dir = ctx.output_dir(args.output_dir.as_deref())?;
    let stem = register.file_stem();

    if save_report {
        let path = dir.join(format!("{}.txt", stem));
        write_text_report(&path, &register.format_text())?;
        println!("Report saved to '{}'", path.display());

        if args.print {
            print_report(&ctx.settings.print_command, &path)?;
            println!("Report sent to printer");
        }
    }

    if args.workbook {
        let path = dir.join(format!("{}.xlsx", stem));
        register.export_workbook(&path)?;
        println!("Workbook saved to '{}'", path.display());
    }
    Ok(())
}

/// Handle the accounts command: list the register's account choices
pub fn handle_accounts_command(ctx: &CommandContext) -> ReportResult<()> {
    let book = ctx.load_book()?;
    let names = register_candidates(&book, &ctx.settings.register_account_types);
    let ids: Vec<_> = names
        .iter()
        .flat_map(|name| book.find_accounts_by_name(name))
        .collect();

    println!("{}", format_account_table(&book, &ids));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        let default = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_date_arg(None, default).unwrap(), default);
        assert_eq!(
            parse_date_arg(Some("03/15/2024"), default).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(parse_date_arg(Some("soon"), default)
            .unwrap_err()
            .is_validation());
    }
}
