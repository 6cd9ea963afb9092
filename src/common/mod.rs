//! Common types and utilities shared by the extractors and the rule engine.

// Submodule declarations
pub mod detection;
pub mod error;
pub mod normalize;
pub mod xml;

// Re-exports for convenience
pub use detection::DocumentProfile;
pub use error::{Error, Result};
pub use normalize::{app_id_equivalent, normalize, normalize_key, normalize_section, values_match};
