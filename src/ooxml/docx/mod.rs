/// Word (.docx) structural extraction.
///
/// The main part is walked once; paragraphs (including those inside table
/// cells) become [`TextBlock`](crate::document::TextBlock)s and tables keep
/// their raw grid. Footers, embedded spreadsheets and the revision-history
/// table are collected alongside.
///
/// # Example
///
/// ```rust,no_run
/// use docvet::document::ExtractOptions;
/// use docvet::ooxml::docx;
/// use docvet::ooxml::opc::Container;
///
/// let container = Container::open_path("release-plan.docx")?;
/// let model = docx::extract(&container, &ExtractOptions::default())?;
///
/// for entry in &model.toc {
///     println!("{}{}", "  ".repeat(entry.level - 1), entry.name);
/// }
/// println!("footer: {}", model.footer_text);
/// # Ok::<(), docvet::common::Error>(())
/// ```
pub mod document;
pub mod field;
pub mod header_footer;
pub mod paragraph;
pub mod revision;
pub mod table;

pub use document::extract;
pub use field::is_page_field;
pub use header_footer::footer_text;
pub use revision::{RevisionHistory, extract_revision_history};
