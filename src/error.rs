//! Custom error types for gnucash-reports
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions. The binary wraps these in anyhow.

use thiserror::Error;

/// The main error type for report operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// The ledger file could not be understood
    #[error("Book error: {0}")]
    Book(String),

    /// Validation errors for user input (dates, names)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The text report file could not be created or written
    #[error("Failed to write report file {path}: {reason}")]
    ReportFile { path: String, reason: String },

    /// The workbook could not be built or saved
    #[error("Could not save XLSX file {path}: {reason}")]
    Workbook { path: String, reason: String },

    /// Spreadsheet construction errors that are not tied to a file yet
    #[error("Export error: {0}")]
    Export(String),

    /// Email composition or delivery errors
    #[error("Email error: {0}")]
    Email(String),
}

impl ReportError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Process exit status for this error.
    ///
    /// A report file that cannot be opened exits with 2 and a workbook that
    /// cannot be saved exits with 3; everything else is a generic failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ReportFile { .. } => 2,
            Self::Workbook { .. } => 3,
            _ => 1,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<quick_xml::Error> for ReportError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Book(format!("Malformed XML: {}", err))
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<lettre::error::Error> for ReportError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Email(err.to_string())
    }
}

impl From<lettre::address::AddressError> for ReportError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::Email(format!("Invalid address: {}", err))
    }
}

impl From<lettre::transport::smtp::Error> for ReportError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::Email(err.to_string())
    }
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;
