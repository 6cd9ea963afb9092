//! Unified error types for docvet.
//!
//! Every layer (archive, XML, spreadsheet, configuration) reports through
//! the same error type so a validation run fails with one top-level error.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
