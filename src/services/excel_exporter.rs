// src/services/excel_exporter.rs
// DOCUMENTATION: Spreadsheet exporter for the merged table
// PURPOSE: Write the unified table to an .xlsx workbook, plain or styled

use crate::errors::PlacesError;
use crate::services::{display_value, MergedTable};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet, XlsxError};
use serde_json::Value;
use std::path::Path;

/// Sheet name used by the styled export
const SHEET_NAME: &str = "Combined JSON Data";

/// Header row fill
const HEADER_FILL: u32 = 0x366092;
/// Alternating data row fill
const STRIPE_FILL: u32 = 0xF8F9FA;
/// Provenance column fill
const SOURCE_FILL: u32 = 0xE8F4FD;

/// Column width cap in characters
const MAX_COLUMN_WIDTH: f64 = 50.0;

/// Spreadsheet exporter
/// DOCUMENTATION: Both variants report success as a boolean and log the
/// failure, writes never panic or propagate
pub struct ExcelExporter;

impl ExcelExporter {
    /// Save the table as a plain workbook
    /// DOCUMENTATION: Header row plus data rows, no styling
    pub fn save_simple(table: &MergedTable, output_file: &Path) -> bool {
        match Self::write_simple(table, output_file) {
            Ok(()) => {
                log::info!("Successfully saved to {}", output_file.display());
                true
            }
            Err(e) => {
                log::error!("{}", e);
                false
            }
        }
    }

    /// Save the table with header styling, stripes and sized columns
    /// DOCUMENTATION: Bold white header on a blue fill, alternating row
    /// shading, highlighted provenance column, widths fit to content
    pub fn save_styled(table: &MergedTable, output_file: &Path) -> bool {
        match Self::write_styled(table, output_file) {
            Ok(()) => {
                log::info!(
                    "Successfully saved styled Excel file to {}",
                    output_file.display()
                );
                true
            }
            Err(e) => {
                log::error!("{}", e);
                false
            }
        }
    }

    fn write_simple(table: &MergedTable, output_file: &Path) -> Result<(), PlacesError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, column) in table.columns.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, column.as_str())
                .map_err(|e| Self::write_error(output_file, e))?;
        }

        for (r, row) in table.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                Self::write_cell(worksheet, (r + 1) as u32, col as u16, cell, None)
                    .map_err(|e| Self::write_error(output_file, e))?;
            }
        }

        workbook
            .save(output_file)
            .map_err(|e| Self::write_error(output_file, e))
    }

    fn write_styled(table: &MergedTable, output_file: &Path) -> Result<(), PlacesError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| Self::write_error(output_file, e))?;

        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let stripe_format = Format::new().set_background_color(Color::RGB(STRIPE_FILL));
        let source_format = Format::new().set_background_color(Color::RGB(SOURCE_FILL));

        let source_idx = table
            .source_column
            .as_ref()
            .and_then(|name| table.columns.iter().position(|c| c == name));

        for (col, column) in table.columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, column.as_str(), &header_format)
                .map_err(|e| Self::write_error(output_file, e))?;
        }

        for (r, row) in table.rows.iter().enumerate() {
            // First data row is shaded, then every other one
            let stripe = r % 2 == 0;

            for (col, cell) in row.iter().enumerate() {
                let format = if source_idx == Some(col) {
                    Some(&source_format)
                } else if stripe {
                    Some(&stripe_format)
                } else {
                    None
                };

                Self::write_cell(worksheet, (r + 1) as u32, col as u16, cell, format)
                    .map_err(|e| Self::write_error(output_file, e))?;
            }
        }

        for (col, width) in Self::column_widths(table).into_iter().enumerate() {
            worksheet
                .set_column_width(col as u16, width)
                .map_err(|e| Self::write_error(output_file, e))?;
        }

        workbook
            .save(output_file)
            .map_err(|e| Self::write_error(output_file, e))
    }

    /// Write one cell with its native Excel type
    /// DOCUMENTATION: Numbers and booleans keep their type, everything
    /// else is rendered to text
    fn write_cell(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &Value,
        format: Option<&Format>,
    ) -> Result<(), XlsxError> {
        if let Some(number) = value.as_f64() {
            return match format {
                Some(f) => worksheet
                    .write_number_with_format(row, col, number, f)
                    .map(|_| ()),
                None => worksheet.write_number(row, col, number).map(|_| ()),
            };
        }

        if let Value::Bool(flag) = value {
            return match format {
                Some(f) => worksheet
                    .write_boolean_with_format(row, col, *flag, f)
                    .map(|_| ()),
                None => worksheet.write_boolean(row, col, *flag).map(|_| ()),
            };
        }

        let text = display_value(value);
        match format {
            Some(f) => worksheet
                .write_string_with_format(row, col, text, f)
                .map(|_| ()),
            None => worksheet.write_string(row, col, text).map(|_| ()),
        }
    }

    /// Width per column: longest rendered value plus padding, capped at 50
    pub(crate) fn column_widths(table: &MergedTable) -> Vec<f64> {
        table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut max_len = column.len();
                for row in &table.rows {
                    let len = display_value(&row[idx]).len();
                    if len > max_len {
                        max_len = len;
                    }
                }
                (max_len as f64 + 2.0).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }

    fn write_error(path: &Path, e: XlsxError) -> PlacesError {
        PlacesError::WriteFailed {
            path: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}
