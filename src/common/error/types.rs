//! Error types for docvet.
//!
//! Only conditions that make a whole validation run meaningless are errors.
//! Missing structures, absent configuration keys and value mismatches are
//! reported as check outcomes instead.
use thiserror::Error;

/// Main error type for docvet operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a readable ZIP container
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    /// A named part does not exist in the container
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// A part exists but is not well-formed XML
    #[error("Malformed XML in {part}: {message}")]
    MalformedXml { part: String, message: String },

    /// An embedded or configuration spreadsheet could not be opened
    #[error("Corrupt spreadsheet: {0}")]
    CorruptSpreadsheet(String),

    /// Settings or configuration input could not be interpreted
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Build a [`Error::MalformedXml`] for the given part.
    pub fn malformed(part: impl Into<String>, message: impl ToString) -> Self {
        Error::MalformedXml {
            part: part.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for docvet operations.
pub type Result<T> = std::result::Result<T, Error>;
