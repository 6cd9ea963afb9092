//! Excel (.xlsx) spreadsheet inspection.
//!
//! Read-only access to embedded or standalone workbooks: sheet names in
//! workbook order and cell text by position.
//!
//! ```rust,no_run
//! use docvet::ooxml::xlsx::Workbook;
//!
//! let workbook = Workbook::open_path("release.xlsx")?;
//! for name in workbook.sheet_names() {
//!     println!("{}: A2 = {}", name, workbook.read_cell_ref(name, "A2"));
//! }
//! # Ok::<(), docvet::Error>(())
//! ```
pub mod cell;
pub mod shared_strings;
pub mod workbook;
pub mod worksheet;

pub use cell::{format_reference, parse_reference};
pub use shared_strings::SharedStrings;
pub use workbook::Workbook;
pub use worksheet::{Worksheet, WorksheetInfo};
