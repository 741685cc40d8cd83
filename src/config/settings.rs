//! User settings for gnucash-reports
//!
//! Where the book lives, where reports go, which accounts the tax and
//! imbalance jobs look at, and how notification email is sent.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::paths::{default_reports_dir, ReportPaths};
use crate::error::ReportError;
use crate::models::AccountType;

/// SMTP settings for the imbalance notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSettings {
    /// SMTP relay host
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,

    /// SMTP submission port (STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Login user; also used as the sender address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Login password; prompted for when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Addresses the status message is sent to
    #[serde(default)]
    pub recipients: Vec<String>,
}

fn default_smtp_server() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            recipients: Vec::new(),
        }
    }
}

impl EmailSettings {
    /// Check the settings are complete enough to send mail
    pub fn validate(&self) -> Result<&str, ReportError> {
        let username = self
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ReportError::Config("email.username is not set".into()))?;
        if self.recipients.is_empty() {
            return Err(ReportError::Config("email.recipients is empty".into()));
        }
        if self.smtp_server.is_empty() {
            return Err(ReportError::Config("email.smtp_server is not set".into()));
        }
        Ok(username)
    }
}

/// User settings for gnucash-reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// GnuCash book file read by every report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_file: Option<PathBuf>,

    /// Directory reports and workbooks are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<PathBuf>,

    /// File listing tax-related account names, one per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_accounts_file: Option<PathBuf>,

    /// Account watched by the imbalance check
    #[serde(default = "default_imbalance_account")]
    pub imbalance_account: String,

    /// Top-level account types offered in the transaction register
    #[serde(default = "default_register_account_types")]
    pub register_account_types: Vec<AccountType>,

    /// Command used to print a saved register report; the file is appended
    #[serde(default = "default_print_command")]
    pub print_command: String,

    /// Notification email
    #[serde(default)]
    pub email: EmailSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_imbalance_account() -> String {
    "Imbalance-USD".to_string()
}

fn default_register_account_types() -> Vec<AccountType> {
    vec![
        AccountType::Bank,
        AccountType::Credit,
        AccountType::Expense,
        AccountType::Income,
    ]
}

fn default_print_command() -> String {
    "lpr -o orientation-requested=4 -o cpi=12 -o page-left=36 -o page-top=36".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            book_file: None,
            reports_dir: None,
            tax_accounts_file: None,
            imbalance_account: default_imbalance_account(),
            register_account_types: default_register_account_types(),
            print_command: default_print_command(),
            email: EmailSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ReportPaths) -> Result<Self, ReportError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ReportError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ReportError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), ReportError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ReportError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| ReportError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The book to open: the command-line override, else the configured file
    pub fn resolve_book(&self, cli_override: Option<&Path>) -> Result<PathBuf, ReportError> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.book_file.clone())
            .ok_or_else(|| {
                ReportError::Config(
                    "No book file given. Pass --book or set book_file in config.json".into(),
                )
            })
    }

    /// Output directory: an explicit non-empty choice, else the configured
    /// reports directory, else `~/GnuCash/Reports/`
    pub fn resolve_reports_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf, ReportError> {
        match cli_override.filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => Ok(dir.to_path_buf()),
            None => match &self.reports_dir {
                Some(dir) => Ok(dir.clone()),
                None => default_reports_dir(),
            },
        }
    }

    /// Tax account list file: the command-line override, else the configured file
    pub fn resolve_tax_accounts_file(
        &self,
        cli_override: Option<&Path>,
    ) -> Result<PathBuf, ReportError> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.tax_accounts_file.clone())
            .ok_or_else(|| {
                ReportError::Config(
                    "No tax account list given. Pass --accounts-file or set tax_accounts_file"
                        .into(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.imbalance_account, "Imbalance-USD");
        assert_eq!(settings.register_account_types.len(), 4);
        assert!(settings.print_command.starts_with("lpr "));
        assert_eq!(settings.email.smtp_server, "smtp.gmail.com");
        assert_eq!(settings.email.smtp_port, 587);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.book_file = Some(PathBuf::from("/books/family.gnucash"));
        settings.imbalance_account = "Imbalance-EUR".into();
        settings.email.recipients = vec!["me@example.com".into()];

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.book_file, settings.book_file);
        assert_eq!(loaded.imbalance_account, "Imbalance-EUR");
        assert_eq!(loaded.email.recipients, vec!["me@example.com".to_string()]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let json = r#"{ "book_file": "/tmp/x.gnucash", "register_account_types": ["BANK", "MONEYMRKT"] }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(
            settings.register_account_types,
            vec![AccountType::Bank, AccountType::MoneyMrkt]
        );
        assert_eq!(settings.email.smtp_port, 587);
    }

    #[test]
    fn test_resolve_book_prefers_override() {
        let mut settings = Settings::default();
        assert!(settings.resolve_book(None).is_err());

        settings.book_file = Some(PathBuf::from("configured.gnucash"));
        assert_eq!(
            settings.resolve_book(None).unwrap(),
            PathBuf::from("configured.gnucash")
        );
        assert_eq!(
            settings.resolve_book(Some(Path::new("cli.gnucash"))).unwrap(),
            PathBuf::from("cli.gnucash")
        );
    }

    #[test]
    fn test_empty_output_dir_falls_back() {
        let mut settings = Settings::default();
        settings.reports_dir = Some(PathBuf::from("/srv/reports"));
        assert_eq!(
            settings.resolve_reports_dir(Some(Path::new(""))).unwrap(),
            PathBuf::from("/srv/reports")
        );
        assert_eq!(
            settings.resolve_reports_dir(Some(Path::new("/tmp/out"))).unwrap(),
            PathBuf::from("/tmp/out")
        );
    }

    #[test]
    fn test_email_validation() {
        let mut email = EmailSettings::default();
        assert!(email.validate().is_err());
        email.username = Some("me@example.com".into());
        assert!(email.validate().is_err());
        email.recipients.push("you@example.com".into());
        assert_eq!(email.validate().unwrap(), "me@example.com");
    }
}
