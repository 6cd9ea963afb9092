//! Document profile detection.
//!
//! A profile selects the extractor, namespace map and rule set. Detection
//! looks at `[Content_Types].xml` first and falls back to well-known part
//! names when the content types are absent or unhelpful.

use crate::common::xml::XmlDocument;
use crate::ooxml::opc::Container;
use crate::ooxml::opc::constants::part_name;
use serde::{Deserialize, Serialize};

/// ZIP local file header signature
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

const CONTENT_TYPES: &str = "[Content_Types].xml";

/// The kind of document being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentProfile {
    /// Word-processing document (.docx)
    Word,
    /// Presentation (.pptx)
    Presentation,
}

impl DocumentProfile {
    /// Detect the profile of an opened container.
    pub fn detect(container: &Container) -> Option<Self> {
        if let Ok(Some(xml)) = container.read_optional(CONTENT_TYPES)
            && let Some(profile) = from_content_types(&xml)
        {
            return Some(profile);
        }

        if container.contains(part_name::WML_DOCUMENT) {
            Some(DocumentProfile::Word)
        } else if container.contains(part_name::PML_PRESENTATION) {
            Some(DocumentProfile::Presentation)
        } else {
            None
        }
    }

    /// Detect the profile from raw bytes; `None` for non-ZIP input.
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 || &bytes[0..4] != ZIP_SIGNATURE {
            return None;
        }
        let container = Container::open(bytes.to_vec()).ok()?;
        Self::detect(&container)
    }

    /// Guess from a file extension (`docx`, `docm`, `pptx`, `pptm`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "docx" | "docm" | "dotx" => Some(DocumentProfile::Word),
            "pptx" | "pptm" | "potx" => Some(DocumentProfile::Presentation),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentProfile::Word => write!(f, "word"),
            DocumentProfile::Presentation => write!(f, "presentation"),
        }
    }
}

fn from_content_types(xml: &[u8]) -> Option<DocumentProfile> {
    let doc = XmlDocument::parse(CONTENT_TYPES, xml).ok()?;
    let content_types: Vec<&str> = doc
        .root()
        .child_elements()
        .filter(|e| e.name() == "Override")
        .filter_map(|e| e.attribute_local("ContentType"))
        .collect();

    if content_types.iter().any(|ct| ct.contains("wordprocessingml.document.main")) {
        Some(DocumentProfile::Word)
    } else if content_types.iter().any(|ct| ct.contains("presentationml.presentation.main")) {
        Some(DocumentProfile::Presentation)
    } else {
        None
    }
}
