//! Docvet - conformance validation for Word and PowerPoint OOXML packages
//!
//! Docvet opens a `.docx` or `.pptx` package, extracts a structural model
//! of it (pages, headings, table of contents, revision history, footer text,
//! named slide shapes and embedded spreadsheets) and checks that model
//! against a set of expectations. The result is a report of per-rule
//! outcomes rather than a pass/fail flag.
//!
//! # Features
//!
//! - **Package reading**: zip container, relationship parts and embedded part titles
//! - **Word extraction**: paragraphs, runs, tables with merged cells, page-number fields
//! - **Presentation extraction**: slides in presentation order, named shapes, tables
//! - **Spreadsheet inspection**: sheet names and cell values of embedded workbooks
//! - **Rule engine**: sections, revision history, first-page fields, TOC,
//!   embedded spreadsheets and slide rules, every threshold configurable
//!
//! # Example - Validating a Word document
//!
//! ```no_run
//! use docvet::{ReleaseRecord, ValidationConfig, Validator};
//! use docvet::validate::ValidationRequest;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new(Default::default())?;
//! let config = ValidationConfig::from_yaml("Sections: [Overview, Scope, Risks]\n")?;
//! let record = ReleaseRecord {
//!     project_name: "Apollo".to_string(),
//!     project_id: "PRJ-9".to_string(),
//!     ..Default::default()
//! };
//!
//! let request = ValidationRequest::new(config).with_record(record);
//! let report = validator.validate_path("release-plan.docx", &request)?;
//! print!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Inspecting the extracted model
//!
//! ```no_run
//! use docvet::document::{ExtractOptions, extract};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = extract(std::fs::read("release-plan.docx")?, &ExtractOptions::default())?;
//! for heading in &model.headings {
//!     println!("{}", heading.name);
//! }
//! println!("{} pages, footer {:?}", model.pages.len(), model.footer_text);
//! # Ok(())
//! # }
//! ```

/// Errors, XML tree, text normalization and profile detection
pub mod common;

/// The structural document model and its extraction entry points
pub mod document;

/// OOXML package readers
///
/// Container and relationship handling plus the Word, presentation and
/// spreadsheet readers that fill the document model.
pub mod ooxml;

/// Rule evaluation and reports
pub mod validate;

pub use common::{DocumentProfile, Error, Result};
pub use validate::{EngineSettings, ReleaseRecord, ValidationConfig, ValidationReport, Validator};
