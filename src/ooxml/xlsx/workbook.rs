//! Excel workbook inspection.
//!
//! [`Workbook`] opens a spreadsheet package from memory, lists its sheets in
//! workbook order and reads cells by position. Any failure while opening is
//! reported as [`Error::CorruptSpreadsheet`]; reads never fail.

use std::collections::HashMap;

use crate::common::error::{Error, Result};
use crate::common::xml::{XmlDocument, find_all, namespaces};
use crate::ooxml::opc::Container;
use crate::ooxml::opc::constants::namespace::OFC_RELATIONSHIPS;
use crate::ooxml::opc::constants::part_name;
use crate::ooxml::opc::rel::Relationships;

use super::cell::parse_reference;
use super::shared_strings::SharedStrings;
use super::worksheet::{Worksheet, WorksheetInfo};

/// An opened spreadsheet with all worksheets loaded.
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Worksheet declarations in workbook order
    worksheets: Vec<WorksheetInfo>,
    /// Loaded cells keyed by worksheet name
    data: HashMap<String, Worksheet>,
}

impl Workbook {
    /// Open a workbook from its raw bytes.
    ///
    /// # Errors
    /// Returns [`Error::CorruptSpreadsheet`] if the bytes are not a readable
    /// spreadsheet package.
    pub fn open(bytes: impl Into<bytes::Bytes>) -> Result<Self> {
        Self::load(bytes.into()).map_err(|e| match e {
            Error::CorruptSpreadsheet(_) => e,
            other => Error::CorruptSpreadsheet(other.to_string()),
        })
    }

    /// Open a workbook from a file path.
    pub fn open_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::open(data)
    }

    fn load(bytes: bytes::Bytes) -> Result<Self> {
        let container = Container::open(bytes)?;
        let worksheets = read_worksheet_infos(&container)?;

        let shared_strings = match container.read_optional(part_name::SML_SHARED_STRINGS)? {
            Some(xml) => SharedStrings::parse(part_name::SML_SHARED_STRINGS, &xml)?,
            None => SharedStrings::default(),
        };

        let mut data = HashMap::with_capacity(worksheets.len());
        for info in &worksheets {
            let sheet = match container.read_optional(&info.part)? {
                Some(xml) => Worksheet::parse(&info.part, &xml, &shared_strings)?,
                None => {
                    log::debug!("worksheet part {} for sheet {:?} is absent", info.part, info.name);
                    Worksheet::default()
                },
            };
            data.insert(info.name.clone(), sheet);
        }

        Ok(Self { worksheets, data })
    }

    /// Sheet names in workbook order, case preserved.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(|ws| ws.name.as_str()).collect()
    }

    /// Worksheet declarations in workbook order.
    pub fn worksheets(&self) -> &[WorksheetInfo] {
        &self.worksheets
    }

    /// Cell text at zero-based `(row, col)`; blank for unknown sheets or
    /// positions outside the used range.
    pub fn read_cell(&self, sheet: &str, row: usize, col: usize) -> &str {
        self.data.get(sheet).map_or("", |ws| ws.cell(row, col))
    }

    /// Cell text at an A1 reference such as `"B8"`; blank if the reference is invalid.
    pub fn read_cell_ref(&self, sheet: &str, reference: &str) -> &str {
        match parse_reference(reference) {
            Some((row, col)) => self.read_cell(sheet, row, col),
            None => {
                log::warn!("invalid cell reference {:?}", reference);
                ""
            },
        }
    }

    /// Dense grid of a sheet's used range; empty for unknown sheets.
    pub fn rows(&self, sheet: &str) -> Vec<Vec<String>> {
        self.data.get(sheet).map(Worksheet::rows).unwrap_or_default()
    }

    /// Look up a sheet name case-insensitively, returning the stored spelling.
    pub fn find_sheet(&self, name: &str) -> Option<&str> {
        let wanted = name.trim();
        self.worksheets
            .iter()
            .map(|ws| ws.name.as_str())
            .find(|n| n.trim().eq_ignore_ascii_case(wanted))
    }
}

/// Read sheet declarations and resolve each to its worksheet part.
fn read_worksheet_infos(container: &Container) -> Result<Vec<WorksheetInfo>> {
    let xml = container.read_part(part_name::SML_WORKBOOK)?;
    let doc = XmlDocument::parse(part_name::SML_WORKBOOK, &xml)?;

    let rels = match container.read_optional(part_name::SML_WORKBOOK_RELS)? {
        Some(rels_xml) => Relationships::parse(part_name::SML_WORKBOOK, &rels_xml)?,
        None => Relationships::default(),
    };

    let infos = find_all(doc.root(), "s:sheets/s:sheet", &namespaces::SPREADSHEET)
        .into_iter()
        .enumerate()
        .filter_map(|(index, sheet)| {
            let name = sheet.attribute_local("name")?.to_string();
            let relationship_id = sheet.attribute(Some(OFC_RELATIONSHIPS), "id").map(str::to_string);
            let part = relationship_id
                .as_deref()
                .and_then(|r_id| rels.target_part(r_id))
                .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", index + 1));
            Some(WorksheetInfo {
                name,
                relationship_id,
                part,
            })
        })
        .collect();
    Ok(infos)
}
