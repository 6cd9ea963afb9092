//! Embedded spreadsheet listing shared by the Word and presentation extractors.

use crate::common::error::Result;
use crate::document::{EmbeddedPart, ExtractOptions};
use crate::ooxml::opc::{Container, RelationshipResolver};
use bytes::Bytes;

/// Every part under `prefix` with a spreadsheet extension, in archive order.
///
/// Relationship ids and titles come from `resolver`; unresolved titles
/// leave [`EmbeddedPart::resolved_title`] empty.
pub fn list_embedded(
    container: &Container,
    prefix: &str,
    options: &ExtractOptions,
    resolver: &RelationshipResolver,
) -> Result<Vec<EmbeddedPart>> {
    let mut parts = Vec::new();
    for name in container.list_parts(Some(prefix), None) {
        if !options.is_embedded_spreadsheet(name) {
            continue;
        }
        let bytes = Bytes::from(container.read_part(name)?);
        let part = EmbeddedPart {
            physical_name: name.to_string(),
            bytes,
            relationship_id: resolver.relationship_id(name).map(str::to_string),
            resolved_title: resolver.resolve_title(name),
        };
        log::debug!(
            "embedded part {} ({} bytes) titled {:?}",
            part.physical_name,
            part.bytes.len(),
            part.display_name()
        );
        parts.push(part);
    }
    Ok(parts)
}
