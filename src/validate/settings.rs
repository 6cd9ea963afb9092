//! Engine settings: every tunable constant of extraction and validation.
//!
//! Settings are plain serde structs; every section is `#[serde(default)]`
//! so a YAML file only needs to name what it changes:
//!
//! ```yaml
//! revision:
//!   recency_days: 14
//! embedded:
//!   min_matching_sheets: 2
//! ```

use crate::common::error::{Error, Result};
use crate::document::ExtractOptions;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// All validation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub revision: RevisionSettings,
    pub page1: Page1Settings,
    pub sections: SectionSettings,
    pub toc: TocSettings,
    pub embedded: EmbeddedSettings,
    pub presentation: PresentationSettings,
}

/// Revision-history table location and checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevisionSettings {
    /// Paragraph text that precedes the table
    pub marker: String,
    /// Rows above the header row
    pub title_rows: usize,
    /// Header of the author column (lowercase)
    pub author_column: String,
    /// Header of the date column (lowercase)
    pub date_column: String,
    /// `strftime`-style formats, tried in order
    pub date_formats: Vec<String>,
    /// Maximum age of the newest revision, in days
    pub recency_days: i64,
}

impl Default for RevisionSettings {
    fn default() -> Self {
        Self {
            marker: "Document Change History and Management".to_string(),
            title_rows: 1,
            author_column: "author".to_string(),
            date_column: "revision date".to_string(),
            date_formats: [
                "%d-%B-%Y",
                "%d-%b-%Y",
                "%m/%d/%Y",
                "%d/%m/%Y",
                "%d-%m-%Y",
                "%Y-%m-%d",
                "%Y/%m/%d",
                "%d.%m.%Y",
                "%A, %d %B %Y",
                "%d %B %Y",
                "%d-%m-%Y %H:%M:%S",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
            recency_days: 7,
        }
    }
}

/// One first-page field: the text after `label:` up to the next label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPattern {
    /// Record field the captured value is compared with
    pub field: String,
    /// Label written in the document
    pub label: String,
    /// Label that ends the value; the value may also run to the end of the window
    pub next_label: Option<String>,
}

impl FieldPattern {
    pub fn new(field: &str, label: &str, next_label: Option<&str>) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            next_label: next_label.map(str::to_string),
        }
    }

    /// `Label\s*:\s*(.+?)(?:\s+NextLabel|$)`, labels matched literally.
    pub fn regex(&self) -> Result<Regex> {
        let label = words_pattern(&self.label);
        let pattern = match &self.next_label {
            Some(next) => format!(r"{}\s*:\s*([^\n]+?)(?:\s+{}|$)", label, words_pattern(next)),
            None => format!(r"{}\s*:\s*([^\n]+?)$", label),
        };
        Regex::new(&pattern).map_err(|e| Error::InvalidConfig(format!("page1 field {}: {}", self.field, e)))
    }
}

/// Escape a label, letting any whitespace run stand for its spaces.
fn words_pattern(label: &str) -> String {
    label
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// First-page identification fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page1Settings {
    /// Characters of leading document text searched for fields
    pub window_chars: usize,
    pub fields: Vec<FieldPattern>,
}

impl Default for Page1Settings {
    fn default() -> Self {
        Self {
            window_chars: 500,
            fields: vec![
                FieldPattern::new("Project Name", "Project Name", Some("Release")),
                FieldPattern::new("Release Name", "Release", Some("Project ID")),
                FieldPattern::new("Project ID", "Project ID", Some("Enterprise Release ID")),
                FieldPattern::new("Release ID", "Enterprise Release ID", Some("Application Name")),
                FieldPattern::new("Application Name", "Application Name", Some("Application ID")),
                FieldPattern::new("Application ID", "Application ID", Some("Document Change History")),
            ],
        }
    }
}

/// Section heading detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSettings {
    /// Paragraph style ids that make a paragraph a heading
    pub heading_style: String,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            heading_style: ExtractOptions::default().heading_style,
        }
    }
}

/// Table-of-contents detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocSettings {
    /// Paragraph style ids of TOC lines
    pub style_pattern: String,
}

impl Default for TocSettings {
    fn default() -> Self {
        Self {
            style_pattern: ExtractOptions::default().toc_style,
        }
    }
}

/// Embedded spreadsheet checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedSettings {
    pub extensions: Vec<String>,
    /// Sheet names that count towards the minimum, compared case-insensitively
    pub sheet_allow_list: Vec<String>,
    pub min_matching_sheets: usize,
    /// Cell holding the project id on the first matching sheet
    pub project_id_cell: String,
    /// Cell holding the release id on the first matching sheet
    pub release_id_cell: String,
}

impl Default for EmbeddedSettings {
    fn default() -> Self {
        Self {
            extensions: ExtractOptions::default().embedded_extensions,
            sheet_allow_list: ["summary", "logs", "contacts", "architecture", "nonfunctional requirement", "test data"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_matching_sheets: 3,
            project_id_cell: "A2".to_string(),
            release_id_cell: "B8".to_string(),
        }
    }
}

/// Shape names and table values used by the presentation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    /// `(shape name, record field)` pairs read from slide 1
    pub slide1_fields: Vec<(String, String)>,
    pub header_shape: String,
    pub summary_shape: String,
    /// Allowed first-column values of the execution table (case-insensitive)
    pub test_types: Vec<String>,
    pub title_shape: String,
    pub observations_shape: String,
    /// Extensions accepted for the slide 2 attachment
    pub attachment_extensions: Vec<String>,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        let pair = |shape: &str, field: &str| (shape.to_string(), field.to_string());
        Self {
            slide1_fields: vec![
                pair("Slide1ProjectName", "Project Name"),
                pair("Slide1ProjectID", "Project ID"),
                pair("Slide1AppID", "Application ID"),
                pair("Slide1ApplicationName", "Application Name"),
                pair("Slide1ReleaseName", "Release Name"),
            ],
            header_shape: "Slide2Header".to_string(),
            summary_shape: "Slide2Summary".to_string(),
            test_types: ["load test", "endurance test", "load", "endurance"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            title_shape: "Title".to_string(),
            observations_shape: "Observations".to_string(),
            attachment_extensions: ["xlsx", "xlsm", "xls", "csv"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EngineSettings {
    /// Parse settings from YAML; absent keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_saphyr::from_str(yaml).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.check()?;
        Ok(settings)
    }

    /// Reject settings that cannot be used: bad patterns or an empty window.
    pub fn check(&self) -> Result<()> {
        self.extract_options().compile()?;
        for field in &self.page1.fields {
            field.regex()?;
        }
        if self.page1.window_chars == 0 {
            return Err(Error::InvalidConfig("page1.window_chars must be positive".to_string()));
        }
        if self.revision.recency_days < 0 || chrono::TimeDelta::try_days(self.revision.recency_days).is_none() {
            return Err(Error::InvalidConfig(format!(
                "revision.recency_days out of range: {}",
                self.revision.recency_days
            )));
        }
        if self.revision.date_formats.is_empty() {
            return Err(Error::InvalidConfig("revision.date_formats is empty".to_string()));
        }
        for cell in [&self.embedded.project_id_cell, &self.embedded.release_id_cell] {
            if crate::ooxml::xlsx::cell::parse_reference(cell).is_none() {
                return Err(Error::InvalidConfig(format!("not a cell reference: {}", cell)));
            }
        }
        Ok(())
    }

    /// The extraction subset of the settings.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            heading_style: self.sections.heading_style.clone(),
            toc_style: self.toc.style_pattern.clone(),
            revision_marker: self.revision.marker.clone(),
            revision_title_rows: self.revision.title_rows,
            embedded_extensions: self.embedded.extensions.clone(),
        }
    }
}
