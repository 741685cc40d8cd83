//! Export module for gnucash-reports
//!
//! Writes finished reports to disk:
//! - Text: fixed-width report files
//! - Workbook: `.xlsx` spreadsheets via rust_xlsxwriter

pub mod text;
pub mod workbook;

use std::path::Path;

pub use text::write_text_report;
pub use workbook::{set_column_widths, write_headers, write_workbook, SheetFormats};

/// Create the directory a report file goes into, if it is missing
pub(crate) fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
