/// Footer text extraction.
///
/// Every `word/footer*.xml` part is read in archive order; the text of each
/// is collected with page-number fields removed.
use crate::common::error::Result;
use crate::common::xml::XmlDocument;
use crate::document::paragraph::join_texts;
use crate::ooxml::docx::field::visible_texts;
use crate::ooxml::opc::Container;
use crate::ooxml::opc::constants::part_name;

/// Text of all footer parts joined with single spaces.
///
/// A document without footers yields an empty string. A footer part that
/// is not well-formed XML is an error.
pub fn footer_text(container: &Container) -> Result<String> {
    let mut texts = Vec::new();
    for name in container.list_parts(Some(part_name::WML_FOOTER_PREFIX), Some(".xml")) {
        let xml = container.read_part(name)?;
        let doc = XmlDocument::parse(name, &xml)?;
        let found = visible_texts(doc.root());
        log::debug!("{}: {} footer text runs", name, found.len());
        texts.extend(found);
    }
    Ok(join_texts(texts.iter().map(String::as_str)))
}
