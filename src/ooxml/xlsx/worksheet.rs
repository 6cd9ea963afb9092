//! Worksheet cell data for Excel files.
//!
//! Cells are rendered to strings when the sheet is loaded; the inspector
//! only ever compares text.

use std::collections::HashMap;

use crate::common::error::Result;
use crate::common::xml::{XmlDocument, XmlElement, find_all, namespaces};
use crate::ooxml::opc::constants::namespace::SML_MAIN;

use super::cell::parse_reference;
use super::shared_strings::{SharedStrings, item_text};

/// Information about a worksheet declared in `xl/workbook.xml`.
#[derive(Debug, Clone)]
pub struct WorksheetInfo {
    /// Worksheet name, case preserved
    pub name: String,
    /// Relationship ID for the worksheet part
    pub relationship_id: Option<String>,
    /// Member name of the worksheet part
    pub part: String,
}

/// Loaded cells of one worksheet.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Non-empty cells keyed by zero-based (row, column)
    cells: HashMap<(usize, usize), String>,
    /// Number of used rows (one past the last non-empty row)
    rows: usize,
    /// Number of used columns (one past the last non-empty column)
    columns: usize,
}

impl Worksheet {
    /// Parse a worksheet part, resolving shared strings.
    pub fn parse(part: &str, xml: &[u8], shared_strings: &SharedStrings) -> Result<Self> {
        let doc = XmlDocument::parse(part, xml)?;
        let mut sheet = Worksheet::default();

        let mut next_row = 0usize;
        for row in find_all(doc.root(), "s:sheetData/s:row", &namespaces::SPREADSHEET) {
            let row_index = row
                .attribute_local("r")
                .and_then(|r| r.trim().parse::<usize>().ok())
                .and_then(|r| r.checked_sub(1))
                .unwrap_or(next_row);
            next_row = row_index + 1;

            let mut next_col = 0usize;
            for cell in row.child_elements().filter(|e| e.is(SML_MAIN, "c")) {
                let (row_at, col_at) = cell
                    .attribute_local("r")
                    .and_then(parse_reference)
                    .unwrap_or((row_index, next_col));
                next_col = col_at + 1;

                let value = cell_value(cell, shared_strings);
                if !value.is_empty() {
                    sheet.insert(row_at, col_at, value);
                }
            }
        }

        Ok(sheet)
    }

    fn insert(&mut self, row: usize, col: usize, value: String) {
        self.rows = self.rows.max(row + 1);
        self.columns = self.columns.max(col + 1);
        self.cells.insert((row, col), value);
    }

    /// Text of a cell; blank outside the used range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.cells.get(&(row, col)).map_or("", String::as_str)
    }

    /// Dense grid of the used range, starting at `A1`.
    pub fn rows(&self) -> Vec<Vec<String>> {
        (0..self.rows)
            .map(|r| (0..self.columns).map(|c| self.cell(r, c).to_string()).collect())
            .collect()
    }

    /// Used range as (rows, columns).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }
}

/// Render a `c` element's value as text.
fn cell_value(cell: &XmlElement, shared_strings: &SharedStrings) -> String {
    let raw = cell.child(SML_MAIN, "v").map(|v| v.text()).unwrap_or_default();

    match cell.attribute_local("t").unwrap_or("n") {
        "s" => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|i| shared_strings.get(i))
            .unwrap_or_default()
            .to_string(),
        "inlineStr" => cell.child(SML_MAIN, "is").map(item_text).unwrap_or_default(),
        "b" => match raw.trim() {
            "1" => "TRUE".to_string(),
            "0" => "FALSE".to_string(),
            other => other.to_string(),
        },
        // "str", "e", "n" and dates: the cached value as written
        _ => raw,
    }
}
