//! Spreadsheet output shared by the report workbooks
//!
//! Every cell is written with an explicit format so the whole sheet uses
//! FreeSans 10. Rows and columns are zero-based here; `A1` is `(0, 0)`.

use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};
use std::path::Path;
use tracing::debug;

use super::create_parent_dir;
use crate::error::{ReportError, ReportResult};

/// Accounting currency format with red negatives in parentheses
pub const CURRENCY_FORMAT: &str = "\"$\"#,##0.00_);[Red](\"$\"#,##0.00)";

/// Share count format
pub const SHARES_FORMAT: &str = "###,##0.0000";

/// Price per share format
pub const SHARE_PRICE_FORMAT: &str = "\"$\"#,##0.0000";

/// Date cell format
pub const DATE_FORMAT: &str = "mm/dd/yyyy";

const FONT_NAME: &str = "FreeSans";
const FONT_SIZE: f64 = 10.0;

/// The cell formats the reports use, all on the same base font
#[derive(Debug, Clone)]
pub struct SheetFormats {
    pub text: Format,
    pub center: Format,
    pub title: Format,
    pub header: Format,
    pub bold_right: Format,
    pub currency: Format,
    pub bold_currency: Format,
    pub shares: Format,
    pub share_price: Format,
    pub date: Format,
}

impl SheetFormats {
    pub fn new() -> Self {
        let text = Format::new().set_font_name(FONT_NAME).set_font_size(FONT_SIZE);
        Self {
            center: text.clone().set_align(FormatAlign::Center),
            title: text.clone().set_bold().set_align(FormatAlign::Center),
            header: text.clone().set_bold().set_align(FormatAlign::Center),
            bold_right: text.clone().set_bold().set_align(FormatAlign::Right),
            currency: text.clone().set_num_format(CURRENCY_FORMAT),
            bold_currency: text.clone().set_bold().set_num_format(CURRENCY_FORMAT),
            shares: text.clone().set_num_format(SHARES_FORMAT),
            share_price: text.clone().set_num_format(SHARE_PRICE_FORMAT),
            date: text
                .clone()
                .set_num_format(DATE_FORMAT)
                .set_align(FormatAlign::Center),
            text,
        }
    }
}

impl Default for SheetFormats {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a workbook with `build` and save it to `path`.
///
/// Any failure, while filling cells or while saving, becomes a
/// [`ReportError::Workbook`] naming the file.
pub fn write_workbook<F>(path: &Path, build: F) -> ReportResult<()>
where
    F: FnOnce(&mut Workbook, &SheetFormats) -> Result<(), XlsxError>,
{
    let to_error = |reason: String| ReportError::Workbook {
        path: path.display().to_string(),
        reason,
    };

    create_parent_dir(path).map_err(|e| to_error(e.to_string()))?;
    let mut workbook = Workbook::new();
    let formats = SheetFormats::new();
    build(&mut workbook, &formats).map_err(|e| to_error(e.to_string()))?;
    workbook.save(path).map_err(|e| to_error(e.to_string()))?;

    debug!(path = %path.display(), "workbook saved");
    Ok(())
}

/// Set several column widths starting at column A
pub fn set_column_widths(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    widths: &[f64],
) -> Result<(), XlsxError> {
    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

/// Write a row of bold centered headings starting at column A
pub fn write_headers(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    first_col: u16,
    headers: &[&str],
    format: &Format,
) -> Result<(), XlsxError> {
    for (offset, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(row, first_col + offset as u16, *header, format)?;
    }
    Ok(())
}
