/// Open Packaging Conventions (OPC) reading.
///
/// This module provides the read-only subset of OPC that validation needs:
///
/// - ZIP-based physical packaging ([`Container`])
/// - Relationship parts and target resolution
/// - Embedded part title resolution through extended properties
pub mod constants;
pub mod phys_pkg;
pub mod rel;
pub mod resolve;

// Re-export commonly used types
pub use phys_pkg::Container;
pub use rel::{Relationship, Relationships};
pub use resolve::RelationshipResolver;
