/// Paragraph and run extraction for WordprocessingML.
///
/// A `<w:p>` becomes a [`TextBlock`]; each `<w:t>` inside one of its runs
/// becomes a [`Run`] carrying the run's bold flag. Text-box content belongs
/// to the paragraphs inside the text box, not to the anchoring paragraph.
use crate::common::xml::{XmlElement, find_first, namespaces};
use crate::document::{Run, TextBlock};
use crate::ooxml::opc::constants::namespace::{MARKUP_COMPATIBILITY, WML_MAIN};

/// Build a text block from a `<w:p>` element.
pub(crate) fn parse_paragraph(p: &XmlElement) -> TextBlock {
    let mut owned = Vec::new();
    own_runs(p, &mut owned);

    let mut runs = Vec::new();
    for r in owned {
        let bold = is_bold(r);
        runs.extend(
            r.child_elements()
                .filter(|e| e.is(WML_MAIN, "t"))
                .map(|t| Run::new(t.text(), bold)),
        );
    }

    let style_id = find_first(p, "w:pPr/w:pStyle", &namespaces::WORD)
        .and_then(|e| e.attribute(Some(WML_MAIN), "val"))
        .map(str::to_string);

    TextBlock::new(runs, style_id, numbering(p), p.position())
}

/// Runs whose nearest enclosing paragraph is `element`.
///
/// Descends through hyperlinks, simple fields and content controls. A run is
/// a leaf, and nested paragraphs and text-box bodies are left to their own blocks.
fn own_runs<'a>(element: &'a XmlElement, out: &mut Vec<&'a XmlElement>) {
    for child in element.child_elements() {
        if child.is(WML_MAIN, "r") {
            out.push(child);
        } else if !(child.is(WML_MAIN, "p") || child.is(WML_MAIN, "txbxContent")) {
            own_runs(child, out);
        }
    }
}

/// `<w:p>` and `<w:tbl>` elements in document order.
///
/// `mc:Fallback` subtrees repeat the content of their `mc:Choice` and are skipped.
pub(crate) fn body_content(root: &XmlElement) -> (Vec<&XmlElement>, Vec<&XmlElement>) {
    fn walk<'a>(element: &'a XmlElement, paragraphs: &mut Vec<&'a XmlElement>, tables: &mut Vec<&'a XmlElement>) {
        for child in element.child_elements() {
            if child.is(MARKUP_COMPATIBILITY, "Fallback") {
                continue;
            }
            if child.is(WML_MAIN, "p") {
                paragraphs.push(child);
            } else if child.is(WML_MAIN, "tbl") {
                tables.push(child);
            }
            walk(child, paragraphs, tables);
        }
    }

    let mut paragraphs = Vec::new();
    let mut tables = Vec::new();
    walk(root, &mut paragraphs, &mut tables);
    (paragraphs, tables)
}

/// `w:rPr/w:b` present and not switched off.
///
/// Handles the tri-state toggle: `w:val` may be `true`/`false`, `1`/`0`,
/// `on`/`off`, or absent (which means on).
pub(crate) fn is_bold(r: &XmlElement) -> bool {
    find_first(r, "w:rPr/w:b", &namespaces::WORD).is_some_and(|b| {
        b.attribute(Some(WML_MAIN), "val")
            .is_none_or(|val| !matches!(val.trim(), "0" | "false" | "off"))
    })
}

/// `numId:ilvl` of a numbered paragraph.
fn numbering(p: &XmlElement) -> Option<String> {
    let num_pr = find_first(p, "w:pPr/w:numPr", &namespaces::WORD)?;
    let value = |local: &str| {
        num_pr
            .child(WML_MAIN, local)
            .and_then(|e| e.attribute(Some(WML_MAIN), "val"))
    };
    let num_id = value("numId")?;
    Some(format!("{}:{}", num_id, value("ilvl").unwrap_or("0")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::XmlDocument;

    fn paragraph(body: &str) -> TextBlock {
        let xml = format!(
            r#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{}</w:p>"#,
            body
        );
        let doc = XmlDocument::parse("word/document.xml", xml.as_bytes()).unwrap();
        parse_paragraph(doc.root())
    }

    #[test]
    fn test_paragraph_text_and_style() {
        let block = paragraph(
            r#"<w:pPr><w:pStyle w:val="Heading2"/></w:pPr>
               <w:r><w:t>Scope</w:t></w:r>
               <w:r><w:t xml:space="preserve">and Goals</w:t></w:r>"#,
        );
        assert_eq!(block.text(), "Scope and Goals");
        assert_eq!(block.style_id(), Some("Heading2"));
        assert!(!block.has_bold_run());
    }

    #[test]
    fn test_run_bold() {
        let block = paragraph(r#"<w:r><w:rPr><w:b/></w:rPr><w:t>Bold text</w:t></w:r>"#);
        assert!(block.has_bold_run());

        let block = paragraph(r#"<w:r><w:rPr><w:b w:val="0"/></w:rPr><w:t>Plain</w:t></w:r>"#);
        assert!(!block.has_bold_run());

        let block = paragraph(r#"<w:r><w:rPr><w:b w:val="off"/></w:rPr><w:t>Plain</w:t></w:r>"#);
        assert!(!block.has_bold_run());
    }

    #[test]
    fn test_hyperlink_runs_and_numbering() {
        let block = paragraph(
            r#"<w:pPr><w:numPr><w:ilvl w:val="1"/><w:numId w:val="4"/></w:numPr></w:pPr>
               <w:hyperlink><w:r><w:t>Linked</w:t></w:r></w:hyperlink>
               <w:r><w:t></w:t></w:r>"#,
        );
        assert_eq!(block.text(), "Linked");
        assert_eq!(block.numbering(), Some("4:1"));
    }

    /// A paragraph anchoring a text box, with the usual Choice/Fallback pair.
    const TEXT_BOX_DOCUMENT: &str = r#"<w:document
        xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
        xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006"
        xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape"
        xmlns:v="urn:schemas-microsoft-com:vml"><w:body>
        <w:p><w:r><w:t>Cover</w:t></w:r><w:r><mc:AlternateContent>
            <mc:Choice Requires="wps"><w:drawing><wps:wsp><wps:txbx><w:txbxContent>
                <w:p><w:r><w:t>Project Name: Apollo</w:t></w:r></w:p>
            </w:txbxContent></wps:txbx></wps:wsp></w:drawing></mc:Choice>
            <mc:Fallback><w:pict><v:shape><v:textbox><w:txbxContent>
                <w:p><w:r><w:t>Project Name: Apollo</w:t></w:r></w:p>
            </w:txbxContent></v:textbox></v:shape></w:pict></mc:Fallback>
        </mc:AlternateContent></w:r></w:p>
        <w:p><w:r><w:t>Body</w:t></w:r></w:p>
    </w:body></w:document>"#;

    #[test]
    fn test_text_box_runs_stay_with_inner_paragraph() {
        let doc = XmlDocument::parse("word/document.xml", TEXT_BOX_DOCUMENT.as_bytes()).unwrap();
        let (paragraphs, tables) = body_content(doc.root());
        let texts: Vec<String> = paragraphs.into_iter().map(|p| parse_paragraph(p).text()).collect();

        assert_eq!(texts, vec!["Cover", "Project Name: Apollo", "Body"]);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_runs_inside_simple_field_and_content_control() {
        let block = paragraph(
            r#"<w:sdt><w:sdtContent><w:r><w:t>Owner:</w:t></w:r></w:sdtContent></w:sdt>
               <w:fldSimple w:instr=" AUTHOR "><w:r><w:t>Jane</w:t></w:r></w:fldSimple>"#,
        );
        assert_eq!(block.text(), "Owner: Jane");
    }
}
