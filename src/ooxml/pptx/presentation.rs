//! Slide order and slide relationships.

use crate::common::error::Result;
use crate::common::xml::{XmlDocument, find_all, namespaces};
use crate::ooxml::opc::constants::{namespace, part_name};
use crate::ooxml::opc::rel::{Relationship, Relationships, part_index, rels_part_for};
use crate::ooxml::opc::Container;

/// Slide part names in presentation order.
///
/// The order comes from `p:sldIdLst` in `ppt/presentation.xml`, resolved
/// through the presentation's relationships. When that list is missing or
/// resolves to nothing, slide parts are ordered by their file number.
pub fn slide_parts(container: &Container) -> Result<Vec<String>> {
    let ordered = match container.read_optional(part_name::PML_PRESENTATION)? {
        Some(xml) => listed_slides(container, &xml)?,
        None => Vec::new(),
    };
    if !ordered.is_empty() {
        return Ok(ordered);
    }

    log::debug!("no slide id list, ordering slides by part number");
    let mut parts: Vec<String> = container
        .list_parts(Some(part_name::PML_SLIDE_PREFIX), Some(".xml"))
        .into_iter()
        .filter(|name| !name.contains("/_rels/"))
        .map(str::to_string)
        .collect();
    parts.sort_by_key(|name| part_index(name).unwrap_or(u32::MAX));
    Ok(parts)
}

fn listed_slides(container: &Container, xml: &[u8]) -> Result<Vec<String>> {
    let doc = XmlDocument::parse(part_name::PML_PRESENTATION, xml)?;
    let r_ids: Vec<&str> = find_all(doc.root(), "p:sldIdLst/p:sldId", &namespaces::PRESENTATION)
        .into_iter()
        .filter_map(|e| e.attribute(Some(namespace::OFC_RELATIONSHIPS), "id"))
        .collect();
    if r_ids.is_empty() {
        return Ok(Vec::new());
    }

    let Some(rels_xml) = container.read_optional(part_name::PML_PRESENTATION_RELS)? else {
        log::warn!("{} lists slides but has no relationships", part_name::PML_PRESENTATION);
        return Ok(Vec::new());
    };
    let rels = Relationships::parse(part_name::PML_PRESENTATION, &rels_xml)?;

    Ok(r_ids
        .into_iter()
        .filter_map(|r_id| {
            let target = rels.target_part(r_id);
            if target.is_none() {
                log::warn!("slide relationship {} does not resolve", r_id);
            }
            target
        })
        .filter(|target| container.contains(target))
        .collect())
}

/// Embedded parts referenced by a slide, as `(member name, relationship id)`.
///
/// A slide without a relationships part references nothing.
pub fn slide_embeddings(container: &Container, slide_part: &str) -> Result<Vec<(String, Relationship)>> {
    let Some(xml) = container.read_optional(&rels_part_for(slide_part))? else {
        return Ok(Vec::new());
    };
    let rels = Relationships::parse(slide_part, &xml)?;
    Ok(rels
        .iter()
        .filter(|rel| !rel.is_external())
        .filter_map(|rel| {
            let target = rels.target_part(rel.r_id())?;
            target
                .starts_with(part_name::PML_EMBEDDINGS)
                .then(|| (target, rel.clone()))
        })
        .collect())
}
