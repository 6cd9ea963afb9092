/// Field-aware text collection.
///
/// Fields come in two shapes: complex fields, spread over runs as
/// `w:fldChar begin` / `w:instrText` / `w:fldChar separate` / result runs /
/// `w:fldChar end`, and simple fields (`w:fldSimple w:instr="..."`) wrapping
/// their result runs. Result text of page-number fields is dropped.
use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::namespace::WML_MAIN;
use std::ops::RangeInclusive;

/// Field instructions whose result is a page number.
const PAGE_FIELDS: &[&str] = &["PAGE", "NUMPAGES", "SECTIONPAGES"];

/// Whether a field instruction such as ` PAGE \* MERGEFORMAT ` yields a page number.
pub fn is_page_field(instruction: &str) -> bool {
    instruction
        .split_whitespace()
        .next()
        .is_some_and(|keyword| PAGE_FIELDS.iter().any(|p| keyword.eq_ignore_ascii_case(p)))
}

#[derive(Debug, Default)]
struct FieldFrame {
    instruction: String,
    page_field: bool,
}

/// Trimmed, non-empty `w:t` texts under `root` in document order, skipping
/// the results of page-number fields.
pub(crate) fn visible_texts(root: &XmlElement) -> Vec<String> {
    let skipped: Vec<RangeInclusive<usize>> = root
        .descendants()
        .filter(|e| e.is(WML_MAIN, "fldSimple"))
        .filter(|e| e.attribute(Some(WML_MAIN), "instr").is_some_and(is_page_field))
        .map(|e| e.position()..=e.descendants().last().map_or(e.position(), XmlElement::position))
        .collect();

    let mut frames: Vec<FieldFrame> = Vec::new();
    let mut texts = Vec::new();

    for element in root.descendants() {
        if element.namespace() != Some(WML_MAIN) {
            continue;
        }
        match element.name() {
            "fldChar" => match element.attribute(Some(WML_MAIN), "fldCharType") {
                Some("begin") => frames.push(FieldFrame::default()),
                Some("separate") => {
                    if let Some(frame) = frames.last_mut() {
                        frame.page_field = is_page_field(&frame.instruction);
                    }
                },
                Some("end") => {
                    frames.pop();
                },
                _ => {},
            },
            "instrText" => {
                if let Some(frame) = frames.last_mut() {
                    frame.instruction.push_str(&element.text());
                }
            },
            "t" => {
                let in_page_field = frames.iter().any(|f| f.page_field)
                    || skipped.iter().any(|range| range.contains(&element.position()));
                let text = element.text();
                let text = text.trim();
                if !in_page_field && !text.is_empty() {
                    texts.push(text.to_string());
                }
            },
            _ => {},
        }
    }
    texts
}
