//! Shared strings table for Excel files.
//!
//! Excel stores most cell strings once in `xl/sharedStrings.xml` and refers
//! to them by index. Rich-text items are flattened; phonetic runs are dropped.

use crate::common::error::Result;
use crate::common::xml::{XmlDocument, XmlElement, find_all, namespaces};
use crate::ooxml::opc::constants::namespace::SML_MAIN;

/// Shared strings table, indexed by position.
#[derive(Debug, Default, Clone)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Parse `xl/sharedStrings.xml` content.
    pub fn parse(part: &str, xml: &[u8]) -> Result<Self> {
        let doc = XmlDocument::parse(part, xml)?;
        let strings = find_all(doc.root(), "s:si", &namespaces::SPREADSHEET)
            .into_iter()
            .map(item_text)
            .collect();
        Ok(Self { strings })
    }

    /// Get a string by its index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Text of an `si` or `is` item: plain `t` or concatenated rich-text runs.
pub(crate) fn item_text(item: &XmlElement) -> String {
    let mut out = String::new();
    for child in item.child_elements() {
        if child.is(SML_MAIN, "t") {
            out.push_str(&child.text());
        } else if child.is(SML_MAIN, "r")
            && let Some(t) = child.child(SML_MAIN, "t")
        {
            out.push_str(&t.text());
        }
    }
    out
}
