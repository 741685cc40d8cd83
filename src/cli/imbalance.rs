//! Imbalance check CLI command

use clap::Args;

use super::CommandContext;
use crate::error::{ReportError, ReportResult};
use crate::notify::{self, Notification};
use crate::reports::ImbalanceStatus;

/// Arguments for `imbalance`
#[derive(Args, Debug, Default)]
pub struct ImbalanceArgs {
    /// Account to check (default: configured imbalance account)
    #[arg(short, long)]
    pub account: Option<String>,

    /// Print the message instead of emailing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle the imbalance command
pub fn handle_imbalance_command(ctx: &CommandContext, args: ImbalanceArgs) -> ReportResult<()> {
    let account = args
        .account
        .unwrap_or_else(|| ctx.settings.imbalance_account.clone());
    let book = ctx.load_book()?;
    let status = ImbalanceStatus::check(&book, &account);

    let notification = Notification {
        subject: status.subject(),
        body: status.message(),
    };

    if args.dry_run {
        println!("Subject: {}", notification.subject);
        println!();
        println!("{}", notification.body);
        return Ok(());
    }

    let email = &ctx.settings.email;
    email.validate()?;
    let password = match &email.password {
        Some(password) => password.clone(),
        None => rpassword::prompt_password("SMTP password: ")
            .map_err(|e| ReportError::Email(format!("Failed to read password: {}", e)))?,
    };

    notify::send(email, &password, &notification)?;
    println!(
        "{} (sent to {})",
        notification.body,
        email.recipients.join(", ")
    );
    Ok(())
}
