//! Validation configuration: expected values for one run.
//!
//! A [`ValidationConfig`] is a Key→Value table (the reserved `Sections` key
//! holds a comma-separated list). A [`ReleaseRecord`] is the row the
//! operator picked from a release list; when given, it supplies the
//! identifier values the first-page and embedded-spreadsheet rules expect.

use crate::common::error::{Error, Result};
use crate::common::normalize::normalize_key;
use crate::ooxml::xlsx::Workbook;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved key holding the expected section names.
pub const SECTIONS_KEY: &str = "Sections";

/// Optional key restricting which record fields the first-page rule checks.
pub const MANDATORY_FIELDS_KEY: &str = "Page1_MandatoryFieldsToValidate";

/// Key→Value expectations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// `(key, value)` in insertion order, both trimmed
    entries: Vec<(String, String)>,
    sections: Vec<String>,
}

/// A YAML config value: scalars are rendered to text, lists are joined with commas.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YamlValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<YamlValue>),
}

impl YamlValue {
    fn render(self) -> String {
        match self {
            YamlValue::Text(s) => s,
            YamlValue::Integer(n) => n.to_string(),
            YamlValue::Float(f) => f.to_string(),
            YamlValue::Bool(b) => b.to_string(),
            YamlValue::List(items) => items
                .into_iter()
                .map(YamlValue::render)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl ValidationConfig {
    /// Build from key/value pairs. Later duplicates replace earlier ones.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = ValidationConfig::default();
        for (key, value) in pairs {
            config.insert(key.as_ref(), value.as_ref());
        }
        config
    }

    /// Parse a YAML mapping of keys to scalars or lists.
    ///
    /// ```
    /// use docvet::validate::ValidationConfig;
    ///
    /// let config = ValidationConfig::from_yaml("Sections: [Overview, Scope]\nProject ID: PRJ-9\n")?;
    /// assert_eq!(config.sections(), ["Overview", "Scope"]);
    /// assert_eq!(config.get("projectid"), Some("PRJ-9"));
    /// # Ok::<(), docvet::common::Error>(())
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let map: BTreeMap<String, YamlValue> =
            serde_saphyr::from_str(yaml).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(Self::from_pairs(map.into_iter().map(|(k, v)| (k, v.render()))))
    }

    /// Read a sheet with `Key` and `Value` header columns.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] when the sheet is missing or lacks either column.
    pub fn from_workbook(workbook: &Workbook, sheet: &str) -> Result<Self> {
        let name = workbook
            .find_sheet(sheet)
            .ok_or_else(|| Error::InvalidConfig(format!("config sheet {:?} not found", sheet)))?;
        let rows = workbook.rows(name);
        let header = rows.first().map(Vec::as_slice).unwrap_or_default();

        let column = |wanted: &str| header.iter().position(|h| h.trim().eq_ignore_ascii_case(wanted));
        let (Some(key_col), Some(value_col)) = (column("Key"), column("Value")) else {
            return Err(Error::InvalidConfig(format!(
                "sheet {:?} must contain Key and Value columns, found {:?}",
                name, header
            )));
        };

        let pairs = rows
            .iter()
            .skip(1)
            .filter_map(|row| {
                let key = row.get(key_col)?.trim();
                (!key.is_empty()).then(|| (key.to_string(), row.get(value_col).cloned().unwrap_or_default()))
            })
            .collect::<Vec<_>>();
        log::debug!("config sheet {:?}: {} keys", name, pairs.len());
        Ok(Self::from_pairs(pairs))
    }

    fn insert(&mut self, key: &str, value: &str) {
        let key = key.trim();
        let value = value.trim();
        if normalize_key(key) == normalize_key(SECTIONS_KEY) {
            self.sections = split_list(value);
        }
        let wanted = normalize_key(key);
        match self.entries.iter_mut().find(|(k, _)| normalize_key(k) == wanted) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    /// Value for `key`, compared ignoring case and whitespace.
    pub fn get(&self, key: &str) -> Option<&str> {
        let wanted = normalize_key(key);
        self.entries
            .iter()
            .find(|(k, _)| normalize_key(k) == wanted)
            .map(|(_, v)| v.as_str())
    }

    /// First non-blank value among `keys`.
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().filter_map(|k| self.get(k)).find(|v| !v.is_empty())
    }

    /// Expected section names, in configured order.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Record fields the first-page rule must check, as normalized keys.
    ///
    /// `None` when the restriction key is absent, meaning every field.
    pub fn mandatory_fields(&self) -> Option<Vec<String>> {
        self.get(MANDATORY_FIELDS_KEY)
            .map(|value| split_list(value).iter().map(|f| normalize_key(f)).collect())
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The release row selected by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseRecord {
    pub release_id: String,
    pub release_name: String,
    pub project_id: String,
    pub project_name: String,
    pub application_id: String,
    pub application_name: String,
}

/// Display labels in release-list column order.
const RECORD_LABELS: [&str; 6] = [
    "Release ID",
    "Release Name",
    "Project ID",
    "Project Name",
    "Application ID",
    "Application Name",
];

/// Column index of a release-list header, accepting common abbreviations.
fn record_column(header: &str) -> Option<usize> {
    match normalize_key(header).as_str() {
        "releaseid" | "enterprisereleaseid" => Some(0),
        "releasename" | "release" => Some(1),
        "projectid" => Some(2),
        "projectname" | "project" => Some(3),
        "applicationid" | "appid" => Some(4),
        "applicationname" | "appname" => Some(5),
        _ => None,
    }
}

impl ReleaseRecord {
    fn slot(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.release_id),
            1 => Some(&mut self.release_name),
            2 => Some(&mut self.project_id),
            3 => Some(&mut self.project_name),
            4 => Some(&mut self.application_id),
            5 => Some(&mut self.application_name),
            _ => None,
        }
    }

    /// Field value by label (`"Project ID"`, `"AppID"`, ...); `None` for unknown labels.
    pub fn field(&self, label: &str) -> Option<&str> {
        let value = match record_column(label)? {
            0 => &self.release_id,
            1 => &self.release_name,
            2 => &self.project_id,
            3 => &self.project_name,
            4 => &self.application_id,
            _ => &self.application_name,
        };
        Some(value.as_str())
    }

    /// `(label, value)` pairs in release-list order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        RECORD_LABELS
            .iter()
            .filter_map(|label| self.field(label).map(|value| (*label, value)))
            .collect()
    }

    /// Read every release row of a release-list sheet.
    ///
    /// Header names are matched ignoring case and spaces. When no header is
    /// recognized the first six columns are taken in the order Release ID,
    /// Release Name, Project ID, Project Name, Application ID, Application
    /// Name. Blank rows are skipped.
    pub fn list_from_workbook(workbook: &Workbook, sheet: &str) -> Result<Vec<ReleaseRecord>> {
        let name = workbook
            .find_sheet(sheet)
            .ok_or_else(|| Error::InvalidConfig(format!("release sheet {:?} not found", sheet)))?;
        let rows = workbook.rows(name);
        let Some(header) = rows.first() else {
            return Ok(Vec::new());
        };

        let mut columns: Vec<Option<usize>> = header.iter().map(|h| record_column(h)).collect();
        if columns.iter().all(Option::is_none) {
            log::warn!("release sheet {:?} has no known headers, using column order", name);
            columns = (0..header.len()).map(|i| (i < RECORD_LABELS.len()).then_some(i)).collect();
        }

        let records = rows
            .iter()
            .skip(1)
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| {
                let mut record = ReleaseRecord::default();
                for (cell, column) in row.iter().zip(&columns) {
                    if let Some(slot) = column.and_then(|c| record.slot(c)) {
                        *slot = cell.trim().to_string();
                    }
                }
                record
            })
            .collect();
        Ok(records)
    }
}
