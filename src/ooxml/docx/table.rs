/// Table extraction for WordprocessingML.
///
/// Produces the raw grid only; merged `Key: Value` cells are left as they
/// are written.
use crate::common::xml::{XmlElement, find_all, find_first, namespaces};
use crate::document::paragraph::join_texts;
use crate::document::{Cell, Row, Table, VMergeState};
use crate::ooxml::opc::constants::namespace::WML_MAIN;

/// Build a table from a `<w:tbl>` element; `None` when it has no rows.
pub(crate) fn parse_table(tbl: &XmlElement) -> Option<Table> {
    let rows: Vec<Row> = tbl
        .child_elements()
        .filter(|e| e.is(WML_MAIN, "tr"))
        .map(|tr| Row::new(tr.child_elements().filter(|e| e.is(WML_MAIN, "tc")).map(parse_cell).collect()))
        .collect();

    let end = tbl.descendants().last().map_or(tbl.position(), XmlElement::position);
    Table::new(rows, tbl.position()).map(|table| table.spanning(end))
}

fn parse_cell(tc: &XmlElement) -> Cell {
    let text = cell_text(tc);

    let grid_span = find_first(tc, "w:tcPr/w:gridSpan", &namespaces::WORD)
        .and_then(|e| e.attribute(Some(WML_MAIN), "val"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1);

    let v_merge = find_first(tc, "w:tcPr/w:vMerge", &namespaces::WORD).map(|e| {
        match e.attribute(Some(WML_MAIN), "val") {
            Some("restart") => VMergeState::Restart,
            _ => VMergeState::Continue,
        }
    });

    Cell::new(text).with_merge(grid_span, v_merge)
}

/// All `w:t` text in the cell, trimmed pieces joined with single spaces.
fn cell_text(tc: &XmlElement) -> String {
    let pieces: Vec<String> = find_all(tc, ".//w:t", &namespaces::WORD)
        .into_iter()
        .map(|t| t.text().trim().to_string())
        .collect();
    join_texts(pieces.iter().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::XmlDocument;

    const TABLE: &[u8] = br#"<w:tbl xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:tblPr/>
  <w:tr>
    <w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr><w:p><w:r><w:t>Document Change History</w:t></w:r></w:p></w:tc>
  </w:tr>
  <w:tr>
    <w:tc><w:tcPr><w:vMerge w:val="restart"/></w:tcPr><w:p><w:r><w:t>Phase</w:t></w:r></w:p></w:tc>
    <w:tc><w:p><w:r><w:t>01 / 02</w:t></w:r><w:r><w:t>/2024</w:t></w:r></w:p></w:tc>
  </w:tr>
  <w:tr>
    <w:tc><w:tcPr><w:vMerge/></w:tcPr><w:p/></w:tc>
    <w:tc><w:p><w:r><w:t>Project Name: Apollo</w:t></w:r></w:p></w:tc>
  </w:tr>
</w:tbl>"#;

    #[test]
    fn test_parse_table_grid() {
        let doc = XmlDocument::parse("word/document.xml", TABLE).unwrap();
        let table = parse_table(doc.root()).unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[0].cells()[0].grid_span(), 2);
        assert_eq!(table.rows()[1].texts(), vec!["Phase", "01 / 02 /2024"]);
        assert_eq!(table.rows()[2].cells()[0].v_merge(), Some(VMergeState::Continue));
        // Merged key/value text is not interpreted here
        assert_eq!(table.rows()[2].cells()[1].text(), "Project Name: Apollo");

        let grid = table.text_grid();
        assert_eq!(grid[2][0], "Phase");
    }

    #[test]
    fn test_table_span_covers_descendants() {
        let doc = XmlDocument::parse("word/document.xml", TABLE).unwrap();
        let table = parse_table(doc.root()).unwrap();
        let last_t = doc.root().descendants().last().unwrap();
        assert!(table.contains_position(last_t.position()));
    }

    #[test]
    fn test_empty_table_is_none() {
        let xml = br#"<w:tbl xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:tblPr/></w:tbl>"#;
        let doc = XmlDocument::parse("word/document.xml", xml).unwrap();
        assert!(parse_table(doc.root()).is_none());
    }
}
