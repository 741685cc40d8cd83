//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::cli::CommandContext;
use crate::display::{parse_user_date, us_date};
use crate::error::{ReportError, ReportResult};
use crate::export::write_text_report;
use crate::models::Book;
use crate::reports::{
    print_report, prior_balance_floor, register_candidates, RegisterQuery, TransactionRegister,
};

use super::widgets::TextInput;

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Accounts,
    Options,
    Register,
}

/// Fields of the options panel, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionField {
    #[default]
    StartDate,
    EndDate,
    PriorBalance,
}

impl OptionField {
    fn next(self) -> Self {
        match self {
            Self::StartDate => Self::EndDate,
            Self::EndDate => Self::PriorBalance,
            Self::PriorBalance => Self::PriorBalance,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::StartDate => Self::StartDate,
            Self::EndDate => Self::StartDate,
            Self::PriorBalance => Self::EndDate,
        }
    }
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Main application state
pub struct App<'a> {
    pub book: &'a Book,
    pub ctx: &'a CommandContext,

    /// Whether the app should quit
    pub should_quit: bool,

    pub focused_panel: FocusedPanel,
    pub focused_field: OptionField,
    pub input_mode: InputMode,

    /// Account names offered in the picker
    pub accounts: Vec<String>,
    pub selected_account_index: usize,

    pub start_input: TextInput,
    pub end_input: TextInput,
    pub include_prior_balance: bool,

    /// Result of the last successful process
    pub register: Option<TransactionRegister>,
    pub selected_entry_index: usize,

    /// Where the current register's text report was written
    pub saved_report: Option<PathBuf>,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(book: &'a Book, ctx: &'a CommandContext) -> Self {
        let accounts = register_candidates(book, &ctx.settings.register_account_types);
        Self {
            book,
            ctx,
            should_quit: false,
            focused_panel: FocusedPanel::default(),
            focused_field: OptionField::default(),
            input_mode: InputMode::default(),
            accounts,
            selected_account_index: 0,
            start_input: TextInput::new(prior_balance_floor().format("%Y-%m-%d").to_string()),
            end_input: TextInput::new(ctx.today.format("%Y-%m-%d").to_string()),
            include_prior_balance: true,
            register: None,
            selected_entry_index: 0,
            saved_report: None,
            status_message: None,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn selected_account(&self) -> Option<&str> {
        self.accounts
            .get(self.selected_account_index)
            .map(String::as_str)
    }

    /// Cycle focus through the panels
    pub fn next_panel(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Accounts => FocusedPanel::Options,
            FocusedPanel::Options if self.register.is_some() => FocusedPanel::Register,
            FocusedPanel::Options | FocusedPanel::Register => FocusedPanel::Accounts,
        };
    }

    /// Move selection up in the focused panel
    pub fn move_up(&mut self) {
        match self.focused_panel {
            FocusedPanel::Accounts => {
                self.selected_account_index = self.selected_account_index.saturating_sub(1);
            }
            FocusedPanel::Options => self.focused_field = self.focused_field.prev(),
            FocusedPanel::Register => {
                self.selected_entry_index = self.selected_entry_index.saturating_sub(1);
            }
        }
    }

    /// Move selection down in the focused panel
    pub fn move_down(&mut self) {
        match self.focused_panel {
            FocusedPanel::Accounts => {
                if self.selected_account_index + 1 < self.accounts.len() {
                    self.selected_account_index += 1;
                }
            }
            FocusedPanel::Options => self.focused_field = self.focused_field.next(),
            FocusedPanel::Register => {
                let count = self.register.as_ref().map_or(0, |r| r.entries.len());
                if self.selected_entry_index + 1 < count {
                    self.selected_entry_index += 1;
                }
            }
        }
    }

    /// The date field under focus, if any
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            OptionField::StartDate => Some(&mut self.start_input),
            OptionField::EndDate => Some(&mut self.end_input),
            OptionField::PriorBalance => None,
        }
    }

    pub fn toggle_prior_balance(&mut self) {
        self.include_prior_balance = !self.include_prior_balance;
    }

    fn parse_field(label: &str, input: &TextInput) -> ReportResult<chrono::NaiveDate> {
        parse_user_date(input.value()).ok_or_else(|| {
            ReportError::Validation(format!(
                "Invalid {} '{}'. Use YYYY-MM-DD or MM/DD/YYYY",
                label,
                input.value()
            ))
        })
    }

    fn build_query(&self) -> ReportResult<RegisterQuery> {
        let account = self
            .selected_account()
            .ok_or_else(|| ReportError::Validation("No account selected".into()))?;
        Ok(RegisterQuery {
            account: account.to_string(),
            start: Self::parse_field("start date", &self.start_input)?,
            end: Self::parse_field("end date", &self.end_input)?,
            include_prior_balance: self.include_prior_balance,
        })
    }

    /// Recompute the register from the current selections.
    ///
    /// A previously saved report no longer matches, so printing is disabled
    /// until the new one is saved.
    pub fn process(&mut self) {
        let result = self
            .build_query()
            .and_then(|query| TransactionRegister::generate(self.book, &query, self.ctx.today));
        match result {
            Ok(register) => {
                let count = register.transactions().count();
                self.set_status(format!(
                    "{}: {} transaction(s), balance {}",
                    register.query.account,
                    count,
                    register.current_balance()
                ));
                self.register = Some(register);
                self.selected_entry_index = 0;
                self.saved_report = None;
            }
            Err(e) => {
                debug!(error = %e, "register not processed");
                self.set_status(format!("Error: {}", e));
            }
        }
    }

    fn processed(&self) -> Option<&TransactionRegister> {
        self.register.as_ref()
    }

    /// Save the text report of the processed register
    pub fn save_report(&mut self) {
        let Some(register) = self.processed() else {
            self.set_status("Process a register first");
            return;
        };
        let text = register.format_text();
        let stem = register.file_stem();

        let result = self.ctx.output_dir(None).and_then(|dir| {
            let path = dir.join(format!("{}.txt", stem));
            write_text_report(&path, &text).map(|()| path)
        });
        match result {
            Ok(path) => {
                self.set_status(format!("Report saved to '{}'", path.display()));
                self.saved_report = Some(path);
            }
            Err(e) => {
                warn!(error = %e, "report not saved");
                self.set_status(format!("Error: {}", e));
            }
        }
    }

    /// Export the processed register as a workbook
    pub fn save_workbook(&mut self) {
        let Some(register) = self.processed() else {
            self.set_status("Process a register first");
            return;
        };
        let result = self.ctx.output_dir(None).and_then(|dir| {
            let path = dir.join(format!("{}.xlsx", register.file_stem()));
            register.export_workbook(&path).map(|()| path)
        });
        match result {
            Ok(path) => self.set_status(format!("Workbook saved to '{}'", path.display())),
            Err(e) => {
                warn!(error = %e, "workbook not saved");
                self.set_status(format!("Error: {}", e));
            }
        }
    }

    /// Print the saved report
    pub fn print(&mut self) {
        let Some(path) = self.saved_report.clone() else {
            self.set_status("Save the report before printing");
            return;
        };
        match print_report(&self.ctx.settings.print_command, &path) {
            Ok(()) => self.set_status(format!("Sent '{}' to the printer", path.display())),
            Err(e) => self.set_status(format!("Error: {}", e)),
        }
    }

    /// Heading shown above the register table
    pub fn register_title(&self) -> String {
        match self.processed() {
            Some(register) => format!(
                " {} from {} to {} ",
                register.query.account,
                us_date(register.query.start),
                us_date(register.query.end)
            ),
            None => " Register ".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ReportPaths, Settings};
    use crate::gnucash::fixtures::{date, sample_book};
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> CommandContext {
        let settings = Settings {
            reports_dir: Some(temp.path().join("reports")),
            print_command: String::new(),
            ..Settings::default()
        };
        CommandContext {
            paths: ReportPaths::with_base_dir(temp.path().to_path_buf()),
            settings,
            book_override: None,
            today: date(2025, 1, 2),
        }
    }

    fn select(app: &mut App, name: &str) {
        app.selected_account_index = app
            .accounts
            .iter()
            .position(|a| a == name)
            .unwrap();
    }

    #[test]
    fn test_defaults() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let book = sample_book();
        let app = App::new(&book, &ctx);

        assert_eq!(app.start_input.value(), "2000-01-01");
        assert_eq!(app.end_input.value(), "2025-01-02");
        assert!(app.include_prior_balance);
        assert_eq!(app.selected_account(), Some("Charity"));
        assert!(app.register.is_none());
    }

    #[test]
    fn test_actions_require_processing() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let book = sample_book();
        let mut app = App::new(&book, &ctx);

        app.save_report();
        assert_eq!(app.status_message.as_deref(), Some("Process a register first"));
        app.save_workbook();
        assert_eq!(app.status_message.as_deref(), Some("Process a register first"));
        app.print();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Save the report before printing")
        );
        assert!(!temp.path().join("reports").exists());
    }

    #[test]
    fn test_process_and_save() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let book = sample_book();
        let mut app = App::new(&book, &ctx);
        select(&mut app, "Checking Account");
        app.start_input.set("02/01/2024");

        app.process();
        let register = app.register.as_ref().unwrap();
        assert_eq!(register.query.start, date(2024, 2, 1));
        assert_eq!(register.current_balance().cents(), 242655);

        app.save_report();
        let saved = app.saved_report.clone().unwrap();
        assert!(saved.exists());
        assert!(saved.starts_with(temp.path().join("reports")));

        app.save_workbook();
        assert!(saved.with_extension("xlsx").exists());

        // Reprocessing drops the saved report
        app.toggle_prior_balance();
        app.process();
        assert!(app.saved_report.is_none());
    }

    #[test]
    fn test_bad_date_keeps_previous_register() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let book = sample_book();
        let mut app = App::new(&book, &ctx);
        select(&mut app, "Checking Account");
        app.process();
        assert!(app.register.is_some());

        app.end_input.set("someday");
        app.process();
        assert!(app.register.is_some());
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Error: "));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("reports");
        std::fs::write(&blocker, "not a directory").unwrap();
        let ctx = context(&temp);
        let book = sample_book();
        let mut app = App::new(&book, &ctx);
        select(&mut app, "Checking Account");
        app.process();

        app.save_report();
        assert!(app.saved_report.is_none());
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Error: "));
    }

    #[test]
    fn test_print_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let book = sample_book();
        let mut app = App::new(&book, &ctx);
        select(&mut app, "Checking Account");
        app.process();
        app.save_report();

        // empty print command
        app.print();
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Error: "));
    }

    #[test]
    fn test_navigation() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let book = sample_book();
        let mut app = App::new(&book, &ctx);

        app.move_up();
        assert_eq!(app.selected_account_index, 0);
        for _ in 0..50 {
            app.move_down();
        }
        assert_eq!(app.selected_account_index, app.accounts.len() - 1);

        app.next_panel();
        assert_eq!(app.focused_panel, FocusedPanel::Options);
        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.focused_field, OptionField::PriorBalance);
        assert!(app.focused_input().is_none());

        // The register panel is skipped until something is processed
        app.next_panel();
        assert_eq!(app.focused_panel, FocusedPanel::Accounts);
    }
}
