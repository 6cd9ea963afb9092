//! Tunables for structural extraction.

use crate::common::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Extraction settings shared by the Word and presentation extractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Paragraph style ids that mark a heading (bold runs always do)
    pub heading_style: String,
    /// Paragraph style ids of table-of-contents lines; when no paragraph
    /// carries such a style, every paragraph is a TOC candidate
    pub toc_style: String,
    /// Text that locates the revision-history table
    pub revision_marker: String,
    /// Rows above the header row of the revision-history table
    pub revision_title_rows: usize,
    /// Extensions of embedded parts treated as spreadsheets
    pub embedded_extensions: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            heading_style: r"(?i)^(heading\s*\d+|title)$".to_string(),
            toc_style: r"(?i)^toc\s*\d*$".to_string(),
            revision_marker: "Document Change History and Management".to_string(),
            revision_title_rows: 1,
            embedded_extensions: vec!["xlsx".to_string(), "xlsm".to_string()],
        }
    }
}

impl ExtractOptions {
    /// Compile the style patterns.
    pub(crate) fn compile(&self) -> Result<CompiledOptions> {
        let compile = |name: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| Error::InvalidConfig(format!("{}: {}", name, e)))
        };
        Ok(CompiledOptions {
            heading_style: compile("heading_style", &self.heading_style)?,
            toc_style: compile("toc_style", &self.toc_style)?,
        })
    }

    /// Whether `name` ends with one of the embedded spreadsheet extensions.
    pub fn is_embedded_spreadsheet(&self, name: &str) -> bool {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return false;
        };
        self.embedded_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

/// Options with their patterns compiled for one extraction run.
pub(crate) struct CompiledOptions {
    pub heading_style: Regex,
    pub toc_style: Regex,
}
