//! Office Open XML (OOXML) reading.
//!
//! The module is organized into several layers:
//!
//! 1. **OPC Layer** (`opc`): the zip container, relationship parts and
//!    embedded-part title resolution
//! 2. **Format-Specific Extractors**:
//!    - `docx`: Word documents
//!    - `pptx`: PowerPoint presentations
//!    - `xlsx`: embedded spreadsheets (sheet names and cell values only)
//!
//! Nothing here writes packages; every type is a read-only view.
//!
//! # Example: Reading an embedded workbook
//!
//! ```rust,no_run
//! use docvet::ooxml::opc::Container;
//! use docvet::ooxml::xlsx::Workbook;
//!
//! let container = Container::open_path("release-plan.docx")?;
//! for name in container.list_parts(Some("word/embeddings/"), Some(".xlsx")) {
//!     let workbook = Workbook::open(container.read_part(name)?)?;
//!     println!("{}: {:?}", name, workbook.sheet_names());
//! }
//! # Ok::<(), docvet::common::Error>(())
//! ```
pub mod docx;
pub mod embeddings;
pub mod opc;
pub mod pptx;
pub mod xlsx;

pub use embeddings::list_embedded;
pub use opc::{Container, RelationshipResolver};
