//! PowerPoint (.pptx) structural extraction.
//!
//! Slides are read in presentation order. Each slide becomes one page of
//! the model; its named shapes and tables are kept on the [`Slide`] for
//! the slide rules, and every DrawingML paragraph becomes a text block.
//!
//! # Example
//!
//! ```rust,no_run
//! use docvet::document::ExtractOptions;
//! use docvet::ooxml::opc::Container;
//! use docvet::ooxml::pptx;
//!
//! let container = Container::open_path("status.pptx")?;
//! let model = pptx::extract(&container, &ExtractOptions::default())?;
//!
//! for slide in &model.slides {
//!     for shape in &slide.shapes {
//!         println!("slide {} {}: {}", slide.number, shape.name, shape.text);
//!     }
//! }
//! # Ok::<(), docvet::common::Error>(())
//! ```

pub mod presentation;
pub mod slide;

pub use presentation::{slide_embeddings, slide_parts};
pub use slide::{SlideContent, parse_slide};

use crate::common::DocumentProfile;
use crate::common::error::Result;
use crate::document::{DocumentModel, ExtractOptions, Page, Slide};
use crate::ooxml::embeddings::list_embedded;
use crate::ooxml::opc::constants::part_name;
use crate::ooxml::opc::{Container, RelationshipResolver};

/// Extract the model of a presentation.
///
/// # Errors
///
/// A malformed slide, presentation or relationships part aborts extraction.
pub fn extract(container: &Container, options: &ExtractOptions) -> Result<DocumentModel> {
    // Invalid patterns are rejected for every profile
    options.compile()?;

    let mut model = DocumentModel::empty(DocumentProfile::Presentation);
    let mut relationships = Vec::new();
    let mut base = 0;

    for (index, part) in slide_parts(container)?.into_iter().enumerate() {
        let xml = container.read_part(&part)?;
        let SlideContent { mut slide, blocks, span } = parse_slide(&part, &xml, index + 1, base)?;
        base += span;

        for (target, rel) in slide_embeddings(container, &part)? {
            relationships.push(rel);
            slide.embedded.push(target);
        }

        let start = model.blocks.len();
        model.blocks.extend(blocks);
        model.pages.push(Page {
            number: slide.number,
            blocks: start..model.blocks.len(),
        });
        model.tables.extend(slide.tables.iter().cloned());
        log::debug!("{}: slide {} with {} shapes", part, slide.number, slide.shapes.len());
        model.slides.push(slide);
    }

    // Presentations carry no part titles for embeddings
    let resolver = RelationshipResolver::from_parts(relationships, Vec::new());
    model.embedded = list_embedded(container, part_name::PML_EMBEDDINGS, options, &resolver)?;

    log::debug!(
        "presentation model: {} slides, {} blocks, {} embedded",
        model.slides.len(),
        model.blocks.len(),
        model.embedded.len()
    );
    Ok(model)
}

/// Embedded part names referenced from `slide` that are spreadsheets.
pub fn slide_spreadsheets<'a>(slide: &'a Slide, options: &'a ExtractOptions) -> impl Iterator<Item = &'a str> + 'a {
    slide
        .embedded
        .iter()
        .map(String::as_str)
        .filter(|name| options.is_embedded_spreadsheet(name))
}
