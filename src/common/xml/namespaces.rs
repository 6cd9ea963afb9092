//! Fixed namespace maps, one per part family.
//!
//! Paths in the extractors are written against these prefixes; the prefixes
//! used inside a given part file do not matter.
use super::path::NamespaceMap;
use crate::ooxml::opc::constants::namespace as ns;

/// WordprocessingML document, header and footer parts.
pub const WORD: NamespaceMap = NamespaceMap::new(&[("w", ns::WML_MAIN), ("r", ns::OFC_RELATIONSHIPS)]);

/// PresentationML slide and presentation parts.
pub const PRESENTATION: NamespaceMap = NamespaceMap::new(&[
    ("p", ns::PML_MAIN),
    ("a", ns::DML_MAIN),
    ("r", ns::OFC_RELATIONSHIPS),
]);

/// SpreadsheetML workbook, sheet and shared-string parts.
pub const SPREADSHEET: NamespaceMap = NamespaceMap::new(&[("s", ns::SML_MAIN), ("r", ns::OFC_RELATIONSHIPS)]);

/// Package relationship parts (`*.rels`).
pub const RELATIONSHIPS: NamespaceMap = NamespaceMap::new(&[("rel", ns::OPC_RELATIONSHIPS)]);

/// Extended properties (`docProps/app.xml`).
pub const EXTENDED_PROPERTIES: NamespaceMap =
    NamespaceMap::new(&[("ep", ns::EXTENDED_PROPERTIES), ("vt", ns::DOC_PROPS_VTYPES)]);
