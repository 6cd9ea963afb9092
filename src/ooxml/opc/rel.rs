//! Relationship parts (`_rels/*.rels`) of an OPC package.
//!
//! Relationships map an id (`rId7`) declared by a source part to a target
//! part or an external URL. Entries are kept in declaration order.

use crate::common::error::Result;
use crate::common::xml::XmlDocument;
use crate::ooxml::opc::constants::{namespace, target_mode};

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference as written, relative to the source part's directory
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(r_id: impl Into<String>, reltype: impl Into<String>, target_ref: impl Into<String>, is_external: bool) -> Self {
        Self {
            r_id: r_id.into(),
            reltype: reltype.into(),
            target_ref: target_ref.into(),
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Numeric suffix of the id (`rId12` → 12).
    pub fn id_number(&self) -> Option<u32> {
        let digits = self.r_id.trim_start_matches(|c: char| !c.is_ascii_digit());
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

/// Ordered relationships declared by one source part.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Source part the targets are relative to (e.g. "word/document.xml")
    source: String,
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Parse a `.rels` part belonging to `source`.
    ///
    /// Elements are matched by local name so packages that omit the
    /// relationships namespace still resolve.
    pub fn parse(source: &str, xml: &[u8]) -> Result<Self> {
        let rels_part = rels_part_for(source);
        let doc = XmlDocument::parse(&rels_part, xml)?;

        let rels = doc
            .root()
            .child_elements()
            .filter(|e| e.name() == "Relationship")
            .filter(|e| e.namespace().is_none_or(|ns| ns == namespace::OPC_RELATIONSHIPS))
            .filter_map(|e| {
                let r_id = e.attribute_local("Id")?;
                let target = e.attribute_local("Target")?;
                let reltype = e.attribute_local("Type").unwrap_or_default();
                let external = e.attribute_local("TargetMode") == Some(target_mode::EXTERNAL);
                Some(Relationship::new(r_id, reltype, target, external))
            })
            .collect();

        Ok(Self {
            source: source.trim_start_matches('/').to_string(),
            rels,
        })
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id() == r_id)
    }

    /// Resolved member name of an internal relationship's target.
    pub fn target_part(&self, r_id: &str) -> Option<String> {
        self.get(r_id)
            .filter(|rel| !rel.is_external())
            .map(|rel| resolve_target(&self.source, rel.target_ref()))
    }

    /// Get an iterator over all relationships.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

/// Member name of the `.rels` part for `source`.
///
/// For example, "word/_rels/document.xml.rels" for "word/document.xml".
pub fn rels_part_for(source: &str) -> String {
    let source = source.trim_start_matches('/');
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", source),
    }
}

/// Resolve a relative `target` against the directory of `source`.
///
/// Absolute targets (leading `/`) are taken from the package root. `.` and
/// `..` segments are collapsed; `..` never climbs above the root.
pub fn resolve_target(source: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    if !target.starts_with('/') {
        let source = source.trim_start_matches('/');
        if let Some((dir, _)) = source.rsplit_once('/') {
            segments.extend(dir.split('/').filter(|s| !s.is_empty()));
        }
    }

    for segment in target.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Trailing number of a part's file stem (`ppt/slides/slide12.xml` → 12).
pub fn part_index(name: &str) -> Option<u32> {
    let file = name.rsplit('/').next().unwrap_or(name);
    let stem = file.split('.').next().unwrap_or(file);
    let digits_at = stem.rfind(|c: char| !c.is_ascii_digit()).map_or(0, |i| i + 1);
    let digits = &stem[digits_at..];
    if digits.is_empty() || digits_at == 0 {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/package" Target="embeddings/Microsoft_Excel_Worksheet.xlsx"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_relationships() {
        let rels = Relationships::parse("word/document.xml", DOCUMENT_RELS).unwrap();
        assert_eq!(rels.len(), 3);

        let rel = rels.get("rId7").unwrap();
        assert_eq!(rel.target_ref(), "embeddings/Microsoft_Excel_Worksheet.xlsx");
        assert_eq!(rel.id_number(), Some(7));
        assert_eq!(
            rels.target_part("rId7").as_deref(),
            Some("word/embeddings/Microsoft_Excel_Worksheet.xlsx")
        );

        assert!(rels.get("rId9").unwrap().is_external());
        assert_eq!(rels.target_part("rId9"), None);
    }

    #[test]
    fn test_rels_part_for() {
        assert_eq!(rels_part_for("word/document.xml"), "word/_rels/document.xml.rels");
        assert_eq!(rels_part_for("/ppt/slides/slide1.xml"), "ppt/slides/_rels/slide1.xml.rels");
        assert_eq!(rels_part_for("root.xml"), "_rels/root.xml.rels");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("ppt/slides/slide1.xml", "../embeddings/a.xlsx"), "ppt/embeddings/a.xlsx");
        assert_eq!(resolve_target("ppt/presentation.xml", "slides/slide2.xml"), "ppt/slides/slide2.xml");
        assert_eq!(resolve_target("word/document.xml", "/word/media/x.png"), "word/media/x.png");
        assert_eq!(resolve_target("a.xml", "../../b.xml"), "b.xml");
    }

    #[test]
    fn test_part_index() {
        assert_eq!(part_index("ppt/slides/slide21.xml"), Some(21));
        assert_eq!(part_index("ppt/presentation.xml"), None);
        assert_eq!(part_index("12.xml"), None);
    }

    #[test]
    fn test_id_number_requires_trailing_digits() {
        assert_eq!(Relationship::new("rId3", "", "", false).id_number(), Some(3));
        assert_eq!(Relationship::new("rIdX", "", "", false).id_number(), None);
        assert_eq!(Relationship::new("rId3a", "", "", false).id_number(), None);
    }
}
