//! In-memory package builders shared by the integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const PKG_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const PACKAGE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/package";

/// Zip `entries` with deflate compression.
pub fn zip_package(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A spreadsheet whose sheets hold inline-string cells.
pub fn xlsx(sheets: &[(&str, &[(&str, &str)])]) -> Vec<u8> {
    let mut workbook = format!(r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="{}"><sheets>"#, R_NS);
    let mut rels = format!(r#"<Relationships xmlns="{}">"#, PKG_RELS_NS);
    let mut entries = Vec::new();

    for (i, (name, cells)) in sheets.iter().enumerate() {
        let n = i + 1;
        workbook.push_str(&format!(r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#, name, n, n));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            n, R_NS, n
        ));
        let mut sheet = String::from(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#);
        for (reference, text) in cells.iter() {
            let row: String = reference.chars().filter(char::is_ascii_digit).collect();
            sheet.push_str(&format!(
                r#"<row r="{}"><c r="{}" t="inlineStr"><is><t>{}</t></is></c></row>"#,
                row, reference, text
            ));
        }
        sheet.push_str("</sheetData></worksheet>");
        entries.push((format!("xl/worksheets/sheet{}.xml", n), sheet.into_bytes()));
    }
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    let mut all: Vec<(&str, Vec<u8>)> = vec![
        ("xl/workbook.xml", workbook.into_bytes()),
        ("xl/_rels/workbook.xml.rels", rels.into_bytes()),
    ];
    all.extend(entries.iter().map(|(n, c)| (n.as_str(), c.clone())));
    zip_package(&all)
}

/// `<w:p>` with an optional style and one run per text.
pub fn paragraph(style: Option<&str>, bold: bool, text: &str) -> String {
    let ppr = style.map_or(String::new(), |s| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, s));
    let rpr = if bold { "<w:rPr><w:b/></w:rPr>" } else { "" };
    format!(r#"<w:p>{}<w:r>{}<w:t>{}</w:t></w:r></w:p>"#, ppr, rpr, text)
}

/// `<w:tbl>` from rows of cell texts; a single-cell row spans `width` columns.
pub fn table(rows: &[&[&str]], width: usize) -> String {
    let mut xml = String::from("<w:tbl>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row.iter() {
            let span = if row.len() == 1 && width > 1 {
                format!(r#"<w:tcPr><w:gridSpan w:val="{}"/></w:tcPr>"#, width)
            } else {
                String::new()
            };
            xml.push_str(&format!("<w:tc>{}{}</w:tc>", span, paragraph(None, false, cell)));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// A Word package around `body`, with one footer and the given embeddings.
pub fn docx(body: &str, footer: &str, embeddings: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}" xmlns:r="{}"><w:body>{}</w:body></w:document>"#,
        W_NS, R_NS, body
    );
    let footer = format!(
        r#"<w:ftr xmlns:w="{}"><w:p><w:r><w:t>{}</w:t></w:r><w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText> PAGE </w:instrText></w:r><w:r><w:fldChar w:fldCharType="separate"/></w:r><w:r><w:t>7</w:t></w:r><w:r><w:fldChar w:fldCharType="end"/></w:r></w:p></w:ftr>"#,
        W_NS, footer
    );

    let mut rels = format!(r#"<Relationships xmlns="{}">"#, PKG_RELS_NS);
    for (i, (name, _)) in embeddings.iter().enumerate() {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="embeddings/{}"/>"#,
            i + 10,
            PACKAGE_REL,
            name
        ));
    }
    rels.push_str("</Relationships>");

    let content_types = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

    let mut entries: Vec<(String, Vec<u8>)> = vec![
        ("[Content_Types].xml".to_string(), content_types.as_bytes().to_vec()),
        ("word/document.xml".to_string(), document.into_bytes()),
        ("word/_rels/document.xml.rels".to_string(), rels.into_bytes()),
        ("word/footer1.xml".to_string(), footer.into_bytes()),
    ];
    for (name, bytes) in embeddings {
        entries.push((format!("word/embeddings/{}", name), bytes.clone()));
    }
    let borrowed: Vec<(&str, Vec<u8>)> = entries.iter().map(|(n, c)| (n.as_str(), c.clone())).collect();
    zip_package(&borrowed)
}

/// One named text shape.
pub fn shape(name: &str, text: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="{}"/></p:nvSpPr><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>"#,
        name, text
    )
}

/// A DrawingML table inside a graphic frame.
pub fn slide_table(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<p:graphicFrame><a:graphic><a:graphicData><a:tbl>");
    for row in rows {
        xml.push_str("<a:tr>");
        for cell in row.iter() {
            xml.push_str(&format!(r#"<a:tc><a:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></a:txBody></a:tc>"#, cell));
        }
        xml.push_str("</a:tr>");
    }
    xml.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
    xml
}

/// A presentation whose slides hold `content` (shape and table XML).
///
/// Slides are listed in `p:sldIdLst` in the given order; `embedding`, when
/// present, is attached to slide 2.
pub fn pptx(slides: &[String], embedding: Option<(&str, Vec<u8>)>) -> Vec<u8> {
    let mut presentation = format!(r#"<p:presentation xmlns:p="{}" xmlns:r="{}"><p:sldIdLst>"#, P_NS, R_NS);
    let mut rels = format!(r#"<Relationships xmlns="{}">"#, PKG_RELS_NS);
    let mut entries: Vec<(String, Vec<u8>)> = Vec::new();

    for (i, content) in slides.iter().enumerate() {
        let n = i + 1;
        presentation.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n + 1));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}/slide" Target="slides/slide{}.xml"/>"#,
            n + 1,
            R_NS,
            n
        ));
        let xml = format!(
            r#"<p:sld xmlns:p="{}" xmlns:a="{}" xmlns:r="{}"><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#,
            P_NS, A_NS, R_NS, content
        );
        entries.push((format!("ppt/slides/slide{}.xml", n), xml.into_bytes()));
    }
    presentation.push_str("</p:sldIdLst></p:presentation>");
    rels.push_str("</Relationships>");

    if let Some((name, bytes)) = embedding {
        let slide_rels = format!(
            r#"<Relationships xmlns="{}"><Relationship Id="rId3" Type="{}" Target="../embeddings/{}"/></Relationships>"#,
            PKG_RELS_NS, PACKAGE_REL, name
        );
        entries.push(("ppt/slides/_rels/slide2.xml.rels".to_string(), slide_rels.into_bytes()));
        entries.push((format!("ppt/embeddings/{}", name), bytes));
    }

    let content_types = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#;
    entries.insert(0, ("[Content_Types].xml".to_string(), content_types.as_bytes().to_vec()));
    entries.insert(1, ("ppt/presentation.xml".to_string(), presentation.into_bytes()));
    entries.insert(2, ("ppt/_rels/presentation.xml.rels".to_string(), rels.into_bytes()));

    let borrowed: Vec<(&str, Vec<u8>)> = entries.iter().map(|(n, c)| (n.as_str(), c.clone())).collect();
    zip_package(&borrowed)
}
