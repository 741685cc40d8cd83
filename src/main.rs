use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gnucash_reports::cli::{
    handle_accounts_command, handle_dump_command, handle_imbalance_command,
    handle_register_command, handle_summary_command, handle_tax_command, CommandContext, DumpArgs,
    ImbalanceArgs, RegisterArgs, SummaryArgs, TaxArgs,
};
use gnucash_reports::config::{ReportPaths, Settings};
use gnucash_reports::display::parse_user_date;
use gnucash_reports::{logging, ReportError};

#[derive(Parser)]
#[command(
    name = "gnucash-reports",
    version,
    about = "Reports from GnuCash XML books",
    long_about = "gnucash-reports reads a GnuCash XML book and produces account \
                  summaries, tax transaction reports and transaction registers as \
                  text reports and XLSX workbooks, checks the imbalance account and \
                  dumps the account tree."
)]
struct Cli {
    /// GnuCash book to read (overrides book_file in config.json)
    #[arg(short, long, global = true, env = "GNUCASH_BOOK")]
    book: Option<PathBuf>,

    /// Run as if today were this date (YYYY-MM-DD or MM/DD/YYYY)
    #[arg(long, global = true, value_parser = parse_as_of)]
    as_of: Option<NaiveDate>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account balances as of today, grouped by the top-level accounts
    Summary(SummaryArgs),

    /// Transactions of the tax accounts over the last calendar year
    Tax(TaxArgs),

    /// Transactions of one account between two dates
    #[command(alias = "reg")]
    Register(RegisterArgs),

    /// List the accounts the register can show
    Accounts,

    /// Email a warning when the imbalance account has transactions
    Imbalance(ImbalanceArgs),

    /// Print account names, types and split counts
    Dump(DumpArgs),

    /// Launch the interactive transaction register
    #[command(alias = "ui")]
    Tui,

    /// Write a default config.json
    Init,

    /// Show current configuration and paths
    Config,
}

fn parse_as_of(raw: &str) -> Result<NaiveDate, String> {
    parse_user_date(raw).ok_or_else(|| format!("'{}' is not YYYY-MM-DD or MM/DD/YYYY", raw))
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, matches!(cli.command, Some(Commands::Tui)));

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        let code = err
            .downcast_ref::<ReportError>()
            .map_or(1, ReportError::exit_code);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = ReportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let ctx = CommandContext {
        paths,
        settings,
        book_override: cli.book,
        today: cli.as_of.unwrap_or_else(|| Local::now().date_naive()),
    };

    match cli.command {
        Some(Commands::Summary(args)) => handle_summary_command(&ctx, args)?,
        Some(Commands::Tax(args)) => handle_tax_command(&ctx, args)?,
        Some(Commands::Register(args)) => handle_register_command(&ctx, args)?,
        Some(Commands::Accounts) => handle_accounts_command(&ctx)?,
        Some(Commands::Imbalance(args)) => handle_imbalance_command(&ctx, args)?,
        Some(Commands::Dump(args)) => handle_dump_command(&ctx, args)?,
        Some(Commands::Tui) => gnucash_reports::tui::run_tui(&ctx)?,
        Some(Commands::Init) => {
            let mut settings = ctx.settings.clone();
            if let Some(book) = ctx.book_override.clone() {
                settings.book_file = Some(book);
            }
            settings.save(&ctx.paths)?;
            println!(
                "Configuration written to {}",
                ctx.paths.settings_file().display()
            );
        }
        Some(Commands::Config) => print_config(&ctx),
        None => {
            println!("gnucash-reports - reports from GnuCash books");
            println!();
            println!("Run 'gnucash-reports --help' for usage information.");
            println!("Run 'gnucash-reports tui' to launch the interactive register.");
        }
    }

    Ok(())
}

fn print_config(ctx: &CommandContext) {
    let settings = &ctx.settings;
    let describe = |path: Option<PathBuf>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    };

    println!("gnucash-reports Configuration");
    println!("=============================");
    println!("Config file:      {}", ctx.paths.settings_file().display());
    if !ctx.paths.is_initialized() {
        println!("                  (not written yet, run 'gnucash-reports init')");
    }
    println!("Book:             {}", describe(ctx.book_path().ok()));
    println!(
        "Reports dir:      {}",
        describe(settings.resolve_reports_dir(None).ok())
    );
    println!(
        "Tax account list: {}",
        describe(settings.tax_accounts_file.clone())
    );
    println!("Imbalance acct:   {}", settings.imbalance_account);
    println!("Print command:    {}", settings.print_command);
    println!(
        "Email:            {}:{} -> {}",
        settings.email.smtp_server,
        settings.email.smtp_port,
        if settings.email.recipients.is_empty() {
            "(no recipients)".to_string()
        } else {
            settings.email.recipients.join(", ")
        }
    );
}
