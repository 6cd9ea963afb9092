//! Resolution of embedded part names to the titles their authors gave them.
//!
//! The main part's relationships map each embedded package to an id such as
//! `rId7`. The extended properties part (`docProps/app.xml`) lists document
//! part titles in `TitlesOfParts`; the id's number minus one indexes that list.
//! Every lookup fails soft: an unresolved title is `None`, never an error.

use crate::common::xml::{XmlDocument, find_all, namespaces};
use crate::ooxml::opc::constants::part_name;
use crate::ooxml::opc::phys_pkg::Container;
use crate::ooxml::opc::rel::{Relationship, Relationships, rels_part_for};
use std::collections::HashMap;

/// Maps embedded part names to relationship ids and authored titles.
#[derive(Debug, Clone, Default)]
pub struct RelationshipResolver {
    /// Embedded file name (no directory) → relationship referencing it
    ids: HashMap<String, Relationship>,
    /// Ordered `TitlesOfParts` entries
    titles: Vec<String>,
}

impl RelationshipResolver {
    /// Load the lookup tables for the embeddings referenced by `main_part`.
    ///
    /// Missing or unreadable parts leave the corresponding table empty.
    pub fn load(container: &Container, main_part: &str) -> Self {
        let ids = read_embedding_ids(container, main_part);
        let titles = read_titles_of_parts(container);
        log::debug!(
            "resolver: {} embedding relationships, {} part titles",
            ids.len(),
            titles.len()
        );
        Self { ids, titles }
    }

    /// Build a resolver from already-parsed relationships and part titles.
    ///
    /// Relationships are keyed by the file name of their target; the first
    /// one referencing a file wins.
    pub fn from_parts(relationships: impl IntoIterator<Item = Relationship>, titles: Vec<String>) -> Self {
        Self {
            ids: by_file_name(relationships),
            titles,
        }
    }

    /// Relationship id referencing the embedded part `physical_name`.
    ///
    /// Both full member names and bare file names are accepted.
    pub fn relationship_id(&self, physical_name: &str) -> Option<&str> {
        self.ids.get(file_name(physical_name)).map(Relationship::r_id)
    }

    /// Authored title of the embedded part `physical_name`, if resolvable.
    pub fn resolve_title(&self, physical_name: &str) -> Option<String> {
        let Some(rel) = self.ids.get(file_name(physical_name)) else {
            log::debug!("no relationship references {}", physical_name);
            return None;
        };
        let title = title_index(rel).and_then(|index| self.titles.get(index)).cloned();
        if title.is_none() {
            log::debug!("{} ({}) has no entry in TitlesOfParts", physical_name, rel.r_id());
        }
        title
    }
}

/// Zero-based title index for a relationship (`rId7` → 6).
fn title_index(rel: &Relationship) -> Option<usize> {
    let number = usize::try_from(rel.id_number()?).ok()?;
    number.checked_sub(1)
}

fn by_file_name(relationships: impl IntoIterator<Item = Relationship>) -> HashMap<String, Relationship> {
    let mut ids = HashMap::new();
    for rel in relationships {
        ids.entry(file_name(rel.target_ref()).to_string()).or_insert(rel);
    }
    ids
}

fn file_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn read_embedding_ids(container: &Container, main_part: &str) -> HashMap<String, Relationship> {
    let rels_part = rels_part_for(main_part);
    let xml = match container.read_optional(&rels_part) {
        Ok(Some(xml)) => xml,
        Ok(None) => return HashMap::new(),
        Err(e) => {
            log::warn!("cannot read {}: {}", rels_part, e);
            return HashMap::new();
        },
    };

    match Relationships::parse(main_part, &xml) {
        Ok(rels) => by_file_name(
            rels.iter()
                .filter(|rel| !rel.is_external() && rel.target_ref().contains("embeddings/"))
                .cloned(),
        ),
        Err(e) => {
            log::warn!("ignoring unreadable relationships: {}", e);
            HashMap::new()
        },
    }
}

fn read_titles_of_parts(container: &Container) -> Vec<String> {
    let xml = match container.read_optional(part_name::EXTENDED_PROPERTIES) {
        Ok(Some(xml)) => xml,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("cannot read {}: {}", part_name::EXTENDED_PROPERTIES, e);
            return Vec::new();
        },
    };

    match XmlDocument::parse(part_name::EXTENDED_PROPERTIES, &xml) {
        Ok(doc) => find_all(doc.root(), "ep:TitlesOfParts//vt:lpstr", &namespaces::EXTENDED_PROPERTIES)
            .into_iter()
            .map(|e| e.text())
            .collect(),
        Err(e) => {
            log::warn!("ignoring unreadable extended properties: {}", e);
            Vec::new()
        },
    }
}
