//! Format-independent document model.
//!
//! The Word and presentation extractors in [`crate::ooxml`] both produce a
//! [`DocumentModel`]; the rule engine only ever sees this model.
//!
//! # Example
//!
//! ```rust,no_run
//! use docvet::document::{ExtractOptions, extract};
//!
//! let bytes = std::fs::read("release-plan.docx")?;
//! let model = extract(bytes, &ExtractOptions::default())?;
//!
//! for heading in &model.headings {
//!     println!("{}", heading.name);
//! }
//! println!("page 1: {}", model.page_text(1));
//! # Ok::<(), docvet::common::Error>(())
//! ```

pub mod options;
pub mod paragraph;
pub mod table;
pub mod types;

pub use options::ExtractOptions;
pub use paragraph::{Run, TextBlock, is_section_heading};
pub use table::{Cell, Row, Table, VMergeState, split_key_values};
pub use types::{DocumentModel, EmbeddedPart, NamedShape, Page, RevisionRecord, SectionHeading, Slide, TocEntry};

use crate::common::{DocumentProfile, Error, Result};
use crate::ooxml::opc::Container;
use crate::ooxml::{docx, pptx};
use bytes::Bytes;

/// Open `bytes` as an OOXML package, detect its profile and extract the model.
pub fn extract(bytes: impl Into<Bytes>, options: &ExtractOptions) -> Result<DocumentModel> {
    let container = Container::open(bytes)?;
    let profile = DocumentProfile::detect(&container)
        .ok_or_else(|| Error::CorruptArchive("neither a Word document nor a presentation".to_string()))?;
    extract_profile(&container, profile, options)
}

/// Extract the model of an already opened container with a known profile.
pub fn extract_profile(container: &Container, profile: DocumentProfile, options: &ExtractOptions) -> Result<DocumentModel> {
    match profile {
        DocumentProfile::Word => docx::extract(container, options),
        DocumentProfile::Presentation => pptx::extract(container, options),
    }
}
