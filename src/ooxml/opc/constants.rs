/// Constant values related to the Open Packaging Convention.
///
/// This module contains XML namespaces, well-known part names and
/// relationship types used by the extractors.

/// XML namespace URIs used in OPC packages
pub mod namespace {
    /// Office relationships namespace
    pub const OFC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// OPC relationships namespace
    pub const OPC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// WordprocessingML main namespace
    pub const WML_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    /// PresentationML main namespace
    pub const PML_MAIN: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML main namespace (slide text and tables)
    pub const DML_MAIN: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// SpreadsheetML main namespace
    pub const SML_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

    /// Markup compatibility namespace (`mc:AlternateContent`)
    pub const MARKUP_COMPATIBILITY: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";

    /// Extended (application) properties namespace
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";

    /// Document properties variant types namespace
    pub const DOC_PROPS_VTYPES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes";
}

/// Well-known part names, without a leading slash as stored in the ZIP.
pub mod part_name {
    pub const WML_DOCUMENT: &str = "word/document.xml";
    pub const WML_DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";
    pub const WML_FOOTER_PREFIX: &str = "word/footer";
    pub const WML_EMBEDDINGS: &str = "word/embeddings/";

    pub const PML_PRESENTATION: &str = "ppt/presentation.xml";
    pub const PML_PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
    pub const PML_SLIDE_PREFIX: &str = "ppt/slides/slide";
    pub const PML_EMBEDDINGS: &str = "ppt/embeddings/";

    pub const SML_WORKBOOK: &str = "xl/workbook.xml";
    pub const SML_WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
    pub const SML_SHARED_STRINGS: &str = "xl/sharedStrings.xml";

    pub const EXTENDED_PROPERTIES: &str = "docProps/app.xml";
}

/// Open XML relationship target modes
pub mod target_mode {
    /// Internal relationship target mode (default)
    pub const INTERNAL: &str = "Internal";

    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs used in OPC packages
pub mod relationship_type {
    pub const PACKAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/package";
    pub const OLE_OBJECT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/oleObject";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
}
