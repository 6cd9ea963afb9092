//! Slide part extraction.
//!
//! A slide contributes its named shapes (`p:sp`), its DrawingML tables
//! (`a:tbl`, usually inside a `p:graphicFrame`) and one text block per
//! DrawingML paragraph (`a:p`).

use crate::common::error::Result;
use crate::common::xml::{XmlDocument, XmlElement, find_all, find_first, namespaces};
use crate::document::paragraph::join_texts;
use crate::document::{Cell, NamedShape, Row, Run, Slide, Table, TextBlock, VMergeState};
use crate::ooxml::opc::constants::namespace::DML_MAIN;

/// A parsed slide plus its text blocks.
#[derive(Debug, Clone)]
pub struct SlideContent {
    pub slide: Slide,
    pub blocks: Vec<TextBlock>,
    /// Number of elements in the part; used to keep positions unique across slides
    pub span: usize,
}

/// Parse one slide part.
///
/// `base` is added to every element position so that blocks and tables of
/// later slides sort after those of earlier ones.
pub fn parse_slide(part: &str, xml: &[u8], number: usize, base: usize) -> Result<SlideContent> {
    let doc = XmlDocument::parse(part, xml)?;
    let root = doc.root();

    let shapes = find_all(root, ".//p:sp", &namespaces::PRESENTATION)
        .into_iter()
        .filter_map(named_shape)
        .collect();

    let tables = find_all(root, ".//a:tbl", &namespaces::PRESENTATION)
        .into_iter()
        .filter_map(|tbl| parse_table(tbl, base))
        .collect();

    let blocks = find_all(root, ".//a:p", &namespaces::PRESENTATION)
        .into_iter()
        .map(|p| parse_paragraph(p, base))
        .collect();

    Ok(SlideContent {
        slide: Slide {
            number,
            part: part.to_string(),
            shapes,
            tables,
            embedded: Vec::new(),
        },
        blocks,
        span: root.descendants().count() + 1,
    })
}

fn named_shape(sp: &XmlElement) -> Option<NamedShape> {
    let name = find_first(sp, "p:nvSpPr/p:cNvPr", &namespaces::PRESENTATION)?.attribute(None, "name")?;
    Some(NamedShape {
        name: name.to_string(),
        text: dml_text(sp),
    })
}

/// All `a:t` text under `scope`, joined with single spaces.
fn dml_text(scope: &XmlElement) -> String {
    let pieces: Vec<String> = find_all(scope, ".//a:t", &namespaces::PRESENTATION)
        .into_iter()
        .map(|t| t.text().trim().to_string())
        .collect();
    join_texts(pieces.iter().map(String::as_str))
}

fn parse_paragraph(p: &XmlElement, base: usize) -> TextBlock {
    let mut runs = Vec::new();
    for r in find_all(p, "a:r", &namespaces::PRESENTATION) {
        let bold = find_first(r, "a:rPr", &namespaces::PRESENTATION)
            .and_then(|rpr| rpr.attribute(None, "b"))
            .is_some_and(|b| matches!(b, "1" | "true"));
        runs.extend(
            r.child_elements()
                .filter(|e| e.is(DML_MAIN, "t"))
                .map(|t| Run::new(t.text(), bold)),
        );
    }
    TextBlock::new(runs, None, None, base + p.position())
}

fn parse_table(tbl: &XmlElement, base: usize) -> Option<Table> {
    let rows: Vec<Row> = find_all(tbl, "a:tr", &namespaces::PRESENTATION)
        .into_iter()
        .map(|tr| {
            Row::new(
                find_all(tr, "a:tc", &namespaces::PRESENTATION)
                    .into_iter()
                    .map(parse_cell)
                    .collect(),
            )
        })
        .collect();

    let end = tbl.descendants().last().map_or(tbl.position(), XmlElement::position);
    Table::new(rows, base + tbl.position()).map(|table| table.spanning(base + end))
}

fn parse_cell(tc: &XmlElement) -> Cell {
    let number = |name: &str| tc.attribute(None, name).and_then(|v| v.trim().parse::<usize>().ok());
    let v_merge = if tc.attribute(None, "vMerge").is_some_and(|v| matches!(v, "1" | "true")) {
        Some(VMergeState::Continue)
    } else if number("rowSpan").is_some_and(|n| n > 1) {
        Some(VMergeState::Restart)
    } else {
        None
    };
    Cell::new(dml_text(tc)).with_merge(number("gridSpan").unwrap_or(1), v_merge)
}
