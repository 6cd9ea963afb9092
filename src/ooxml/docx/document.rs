/// Word document extraction: `word/document.xml` and its satellites into a
/// [`DocumentModel`].
use crate::common::DocumentProfile;
use crate::common::error::Result;
use crate::common::xml::XmlDocument;
use crate::document::options::CompiledOptions;
use crate::document::{DocumentModel, ExtractOptions, Page, SectionHeading, TextBlock, TocEntry};
use crate::ooxml::docx::header_footer::footer_text;
use crate::ooxml::docx::paragraph::{body_content, parse_paragraph};
use crate::ooxml::docx::revision::extract_revision_history;
use crate::ooxml::docx::table::parse_table;
use crate::ooxml::embeddings::list_embedded;
use crate::ooxml::opc::constants::part_name;
use crate::ooxml::opc::{Container, RelationshipResolver};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static PAGE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Page\s+\d+$").expect("valid page marker regex"));

/// Extract the model of a Word document.
///
/// # Errors
///
/// A missing or malformed main part, or a malformed footer, aborts
/// extraction. Absent structures (no revision table, no TOC, no embedded
/// parts) produce empty fields instead.
pub fn extract(container: &Container, options: &ExtractOptions) -> Result<DocumentModel> {
    let compiled = options.compile()?;
    let xml = container.read_part(part_name::WML_DOCUMENT)?;
    let doc = XmlDocument::parse(part_name::WML_DOCUMENT, &xml)?;
    let root = doc.root();

    let (paragraphs, tables) = body_content(root);
    let blocks: Vec<TextBlock> = paragraphs.into_iter().map(parse_paragraph).collect();
    let tables: Vec<_> = tables.into_iter().filter_map(parse_table).collect();

    let mut model = DocumentModel::empty(DocumentProfile::Word);
    model.pages = group_pages(&blocks);
    model.headings = section_headings(&blocks, &compiled);
    model.toc = toc_entries(&blocks, &compiled);

    let history = extract_revision_history(&blocks, &tables, &options.revision_marker, options.revision_title_rows);
    model.revision_table_found = history.table_found;
    model.revision_records = history.records;

    model.footer_text = footer_text(container)?;

    let resolver = RelationshipResolver::load(container, part_name::WML_DOCUMENT);
    model.embedded = list_embedded(container, part_name::WML_EMBEDDINGS, options, &resolver)?;

    log::debug!(
        "word model: {} blocks, {} pages, {} headings, {} TOC entries, {} tables, {} revision records, {} embedded",
        blocks.len(),
        model.pages.len(),
        model.headings.len(),
        model.toc.len(),
        tables.len(),
        model.revision_records.len(),
        model.embedded.len()
    );

    model.blocks = blocks;
    model.tables = tables;
    Ok(model)
}

/// Split blocks into pages at `Page N` marker paragraphs.
///
/// The marker closes the current page. A page is only opened once a block
/// follows, so a trailing marker does not produce an empty page. A document
/// with no blocks still has one (empty) page.
pub(crate) fn group_pages(blocks: &[TextBlock]) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut start = 0;
    for (index, block) in blocks.iter().enumerate() {
        if PAGE_MARKER.is_match(&block.text()) {
            pages.push(Page {
                number: pages.len() + 1,
                blocks: start..index + 1,
            });
            start = index + 1;
        }
    }
    if start < blocks.len() || pages.is_empty() {
        pages.push(Page {
            number: pages.len() + 1,
            blocks: start..blocks.len(),
        });
    }
    pages
}

/// Heading-or-bold paragraphs with text, first occurrence of each name.
fn section_headings(blocks: &[TextBlock], options: &CompiledOptions) -> Vec<SectionHeading> {
    let mut seen = HashSet::new();
    blocks
        .iter()
        .filter(|b| b.is_heading(&options.heading_style))
        .filter_map(|b| {
            let text = b.text();
            if text.is_empty() {
                return None;
            }
            let heading = SectionHeading::new(text, b.position());
            seen.insert(heading.normalized.clone()).then_some(heading)
        })
        .collect()
}

/// TOC lines: TOC-styled paragraphs when the document has any, else every paragraph.
fn toc_entries(blocks: &[TextBlock], options: &CompiledOptions) -> Vec<TocEntry> {
    let is_toc_styled = |b: &&TextBlock| b.style_id().is_some_and(|s| options.toc_style.is_match(s));
    let styled = blocks.iter().any(|b| is_toc_styled(&b));
    log::debug!("TOC source: {}", if styled { "TOC-styled paragraphs" } else { "all paragraphs" });

    blocks
        .iter()
        .filter(|b| !styled || is_toc_styled(b))
        .filter_map(|b| TocEntry::parse(&b.text()))
        .collect()
}
