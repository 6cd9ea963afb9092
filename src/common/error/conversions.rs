//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from
//! third-party error types to the unified Error type.

use super::types::Error;

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::FileNotFound => Error::PartNotFound(err.to_string()),
            zip::result::ZipError::Io(e) => Error::CorruptArchive(e.to_string()),
            other => Error::CorruptArchive(other.to_string()),
        }
    }
}
