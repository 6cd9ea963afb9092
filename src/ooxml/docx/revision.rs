/// Revision-history table location and parsing.
///
/// The table is found by a heading marker rather than by any structural
/// tag: the first paragraph whose text contains the marker anchors the
/// search, and the first table that contains or follows that paragraph is
/// taken.
///
/// Layout of the table:
///
/// ```text
/// | Document Change History (merged title row, skipped) |
/// | Revision Number | Author   | Revision Date |   <- header row
/// | 1               | Jane Doe | 01/02/2024    |   <- records
/// ```
use crate::common::normalize::normalize;
use crate::document::{RevisionRecord, Table, TextBlock};
use once_cell::sync::Lazy;
use regex::Regex;

static SLASH_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*/\s*").expect("valid slash regex"));

/// Result of the revision-history scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionHistory {
    /// Whether a table was found after the marker
    pub table_found: bool,
    pub records: Vec<RevisionRecord>,
}

/// Locate the revision-history table and turn its data rows into records.
///
/// `title_rows` rows are discarded before the header row. Rows whose cells
/// are all blank are skipped. Headers are lowercased.
pub fn extract_revision_history(blocks: &[TextBlock], tables: &[Table], marker: &str, title_rows: usize) -> RevisionHistory {
    let marker = normalize(marker);
    let Some(anchor) = blocks.iter().find(|b| normalize(&b.text()).contains(&marker)) else {
        log::debug!("revision marker {:?} not found", marker);
        return RevisionHistory::default();
    };

    let anchor = anchor.position();
    let Some(table) = tables
        .iter()
        .find(|t| t.contains_position(anchor) || t.position() > anchor)
    else {
        log::debug!("no table after revision marker at {}", anchor);
        return RevisionHistory::default();
    };
    log::debug!("revision table at {} ({} rows)", table.position(), table.row_count());

    let rows = table.rows();
    let Some(header_row) = rows.get(title_rows) else {
        log::warn!("revision table has {} rows, no header row", rows.len());
        return RevisionHistory {
            table_found: true,
            records: Vec::new(),
        };
    };

    let headers: Vec<String> = header_row.cells().iter().map(|c| normalize(c.text())).collect();
    let records = rows[title_rows + 1..]
        .iter()
        .filter(|row| !row.is_blank())
        .map(|row| {
            let fields = headers
                .iter()
                .zip(row.cells())
                .map(|(header, cell)| (header.clone(), tidy_value(cell.text())))
                .collect();
            RevisionRecord::new(fields)
        })
        .collect();

    RevisionHistory {
        table_found: true,
        records,
    }
}

/// `"01 / 02 /2024"` → `"01/02/2024"`.
fn tidy_value(text: &str) -> String {
    SLASH_SPACING.replace_all(text.trim(), "/").into_owned()
}
