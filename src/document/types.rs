//! The structured document model produced by extraction.

use super::paragraph::TextBlock;
use super::table::Table;
use crate::common::DocumentProfile;
use crate::common::normalize::normalize_section;
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static TOC_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)*)?\.?\s*(.+?)\s+\d+$").expect("valid TOC line regex"));

/// A page: a contiguous range of text blocks.
///
/// Page boundaries come from "Page N" marker paragraphs. A marker belongs
/// to the page it closes; the next page starts with the following block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    /// Indices into [`DocumentModel::blocks`]
    pub blocks: Range<usize>,
}

/// A paragraph classified as a section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading {
    pub name: String,
    /// Section-name form of `name`, see [`normalize_section`]
    pub normalized: String,
    pub position: usize,
}

impl SectionHeading {
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        let name = name.into();
        let normalized = normalize_section(&name);
        Self {
            name,
            normalized,
            position,
        }
    }
}

/// One table-of-contents line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Number of dotted components in the leading numbering plus one
    pub level: usize,
    pub name: String,
}

impl TocEntry {
    /// Parse `"2.1 Scope 4"` into level 3 / `"Scope"`.
    ///
    /// Lines without a trailing page number are not TOC entries.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = TOC_LINE.captures(line.trim())?;
        let numbering = caps.get(1).map_or("", |m| m.as_str());
        let name = caps.get(2)?.as_str().trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            level: numbering.matches('.').count() + 1,
            name: name.to_string(),
        })
    }
}

/// One data row of the revision-history table, keyed by lowercased header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionRecord {
    fields: Vec<(String, String)>,
}

impl RevisionRecord {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value under `header`, matched case-insensitively.
    pub fn get(&self, header: &str) -> Option<&str> {
        let header = header.trim();
        self.fields
            .iter()
            .find(|(h, _)| h.eq_ignore_ascii_case(header))
            .map(|(_, v)| v.as_str())
    }

    /// Ordered `(header, value)` pairs.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// A package embedded in the document.
#[derive(Debug, Clone)]
pub struct EmbeddedPart {
    /// Archive member name, e.g. `word/embeddings/Microsoft_Excel_Worksheet1.xlsx`
    pub physical_name: String,
    pub bytes: Bytes,
    pub relationship_id: Option<String>,
    pub resolved_title: Option<String>,
}

impl EmbeddedPart {
    /// The authored title when known, else the member name.
    pub fn display_name(&self) -> &str {
        self.resolved_title.as_deref().unwrap_or(&self.physical_name)
    }
}

/// A named slide shape and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedShape {
    pub name: String,
    pub text: String,
}

/// One slide in presentation order.
#[derive(Debug, Clone, Default)]
pub struct Slide {
    /// 1-based presentation order
    pub number: usize,
    pub part: String,
    pub shapes: Vec<NamedShape>,
    pub tables: Vec<Table>,
    /// Embedded parts referenced from this slide's relationships
    pub embedded: Vec<String>,
}

impl Slide {
    /// First shape with exactly this name.
    pub fn shape(&self, name: &str) -> Option<&NamedShape> {
        self.shapes.iter().find(|s| s.name == name)
    }
}

/// Everything the rules inspect, extracted once per document.
#[derive(Debug, Clone)]
pub struct DocumentModel {
    pub profile: DocumentProfile,
    pub blocks: Vec<TextBlock>,
    pub pages: Vec<Page>,
    pub headings: Vec<SectionHeading>,
    pub toc: Vec<TocEntry>,
    pub tables: Vec<Table>,
    pub revision_records: Vec<RevisionRecord>,
    /// Whether a table followed the revision marker
    pub revision_table_found: bool,
    /// Footer text with page-number fields removed, footers joined in archive order
    pub footer_text: String,
    pub embedded: Vec<EmbeddedPart>,
    pub slides: Vec<Slide>,
}

impl DocumentModel {
    /// An empty model for `profile`.
    pub fn empty(profile: DocumentProfile) -> Self {
        Self {
            profile,
            blocks: Vec::new(),
            pages: Vec::new(),
            headings: Vec::new(),
            toc: Vec::new(),
            tables: Vec::new(),
            revision_records: Vec::new(),
            revision_table_found: false,
            footer_text: String::new(),
            embedded: Vec::new(),
            slides: Vec::new(),
        }
    }

    /// Text blocks of page `number` (1-based); empty when out of range.
    pub fn page_blocks(&self, number: usize) -> &[TextBlock] {
        self.pages
            .iter()
            .find(|p| p.number == number)
            .and_then(|p| self.blocks.get(p.blocks.clone()))
            .unwrap_or(&[])
    }

    /// Text of every block on page `number`, one block per line.
    pub fn page_text(&self, number: usize) -> String {
        self.page_blocks(number)
            .iter()
            .map(TextBlock::text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Slide by 1-based number.
    pub fn slide(&self, number: usize) -> Option<&Slide> {
        self.slides.iter().find(|s| s.number == number)
    }
}
