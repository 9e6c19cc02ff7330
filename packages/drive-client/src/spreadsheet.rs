//! xlsx rendering of a [`Dataset`].

use std::borrow::Cow;

use rust_xlsxwriter::{Format, Workbook};
use serde_json::Value;
use tracing::warn;

use crate::dataset::Dataset;
use crate::error::{DriveError, Result};

/// MIME type of an Office Open XML workbook.
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Name of the single worksheet every upload carries.
pub const SHEET_NAME: &str = "data";

/// Longest text Excel accepts in one cell, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Highest worksheet row and column indices (zero-based).
const MAX_ROW: u32 = 1_048_575;
const MAX_COL: u16 = 16_383;

/// Render the dataset as an in-memory xlsx workbook.
///
/// Row 0 holds the column headers, then one row per record. Strings, numbers
/// and booleans keep their cell type; nulls leave the cell blank; arrays and
/// objects (linked records, attachments) are written as compact JSON.
/// Text longer than [`MAX_CELL_CHARS`] is truncated with a warning.
pub fn build_xlsx(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let columns = dataset.columns();
    for (c, name) in columns.iter().enumerate() {
        let col = column_index(c)?;
        sheet.write_string_with_format(0, col, cell_text(name, 0, name), &header)?;
    }

    for (r, row) in dataset.rows().iter().enumerate() {
        let row_idx = row_index(r)?;
        for (c, cell) in row.iter().enumerate() {
            let col = column_index(c)?;
            let column = columns.get(c).map(String::as_str).unwrap_or_default();
            match cell {
                Value::Null => {}
                Value::Bool(b) => {
                    sheet.write_boolean(row_idx, col, *b)?;
                }
                Value::Number(n) => match n.as_f64() {
                    Some(f) => {
                        sheet.write_number(row_idx, col, f)?;
                    }
                    None => {
                        sheet.write_string(row_idx, col, n.to_string())?;
                    }
                },
                Value::String(s) => {
                    sheet.write_string(row_idx, col, cell_text(s, row_idx, column))?;
                }
                other => {
                    let json = other.to_string();
                    sheet.write_string(row_idx, col, cell_text(&json, row_idx, column))?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn row_index(record: usize) -> Result<u32> {
    u32::try_from(record + 1)
        .ok()
        .filter(|row| *row <= MAX_ROW)
        .ok_or_else(|| {
            DriveError::Config(format!(
                "dataset has more than {} records, the sheet row limit",
                MAX_ROW
            ))
        })
}

fn column_index(column: usize) -> Result<u16> {
    u16::try_from(column)
        .ok()
        .filter(|col| *col <= MAX_COL)
        .ok_or_else(|| {
            DriveError::Config(format!(
                "dataset has more than {} columns, the sheet column limit",
                u32::from(MAX_COL) + 1
            ))
        })
}

/// Cut `text` to [`MAX_CELL_CHARS`] on a character boundary.
fn cell_text<'a>(text: &'a str, row: u32, column: &str) -> Cow<'a, str> {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(
                row,
                column,
                chars = text.chars().count(),
                "Cell text exceeds the xlsx limit, truncating"
            );
            Cow::Owned(text[..cut].to_string())
        }
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_xlsx_produces_zip_container() {
        let mut ds = Dataset::new(["names", "href", "stock"]);
        ds.push_row(vec![json!("Geisha"), json!("https://example.com/geisha"), json!(12)]);
        ds.push_row(vec![json!("Bourbon"), Value::Null, json!(["a", "b"])]);

        let bytes = build_xlsx(&ds).unwrap();

        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_oversized_cell_is_truncated_not_fatal() {
        let mut ds = Dataset::new(["translated_text", "error"]);
        ds.push_row(vec![json!("a".repeat(40_000)), json!({"detail": "é".repeat(40_000)})]);
        ds.push_row(vec![json!("short"), Value::Null]);

        let bytes = build_xlsx(&ds).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_cell_text_cuts_on_char_boundary() {
        let text = "é".repeat(MAX_CELL_CHARS + 5);
        let cut = cell_text(&text, 1, "notes");
        assert_eq!(cut.chars().count(), MAX_CELL_CHARS);
        assert!(matches!(cell_text("short", 1, "notes"), Cow::Borrowed("short")));
    }

    #[test]
    fn test_indices_beyond_sheet_limits_are_rejected() {
        assert_eq!(row_index(0).unwrap(), 1);
        assert!(matches!(row_index(MAX_ROW as usize), Err(DriveError::Config(_))));
        assert_eq!(column_index(MAX_COL as usize).unwrap(), MAX_COL);
        assert!(matches!(column_index(MAX_COL as usize + 1), Err(DriveError::Config(_))));
        assert!(matches!(column_index(70_000), Err(DriveError::Config(_))));
    }

    #[test]
    fn test_build_xlsx_empty_dataset() {
        let bytes = build_xlsx(&Dataset::default()).unwrap();
        assert!(!bytes.is_empty());
    }
}
