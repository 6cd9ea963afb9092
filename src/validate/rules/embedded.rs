//! Embedded spreadsheet sheet names and identifier cells.

use super::{RuleContext, RuleEvaluator};
use crate::common::error::Result;
use crate::common::normalize::{normalize, values_match};
use crate::document::EmbeddedPart;
use crate::ooxml::xlsx::Workbook;
use crate::validate::report::{Category, CategoryReport, CheckResult};

const SHEETS: &str = "Matching sheets";
const PROJECT_CELL: &str = "Project ID cell";
const RELEASE_CELL: &str = "Release ID cell";

/// A part with enough allow-listed sheets, and its first matching sheet.
struct Qualifying<'a> {
    part: &'a EmbeddedPart,
    workbook: Workbook,
    sheet: String,
    count: usize,
}

#[derive(Debug, Default)]
pub struct EmbeddedSpreadsheetRule;

/// Allow-listed sheets of `workbook` in workbook order, at most `limit`.
pub fn matching_sheets<'a>(workbook: &'a Workbook, allow_list: &[String], limit: usize) -> Vec<&'a str> {
    let allowed: Vec<String> = allow_list.iter().map(|s| normalize(s)).collect();
    workbook
        .sheet_names()
        .into_iter()
        .filter(|name| allowed.contains(&normalize(name)))
        .take(limit)
        .collect()
}

impl RuleEvaluator for EmbeddedSpreadsheetRule {
    fn category(&self) -> Category {
        Category::EmbeddedSpreadsheet
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(self.category());
        let settings = &ctx.settings.embedded;
        let minimum = settings.min_matching_sheets;
        let expected_sheets = format!("at least {} allow-listed sheets", minimum);

        if ctx.model.embedded.is_empty() {
            let reason = "no embedded spreadsheet";
            report.push(CheckResult::missing(SHEETS, expected_sheets, reason));
            report.push(CheckResult::missing(PROJECT_CELL, settings.project_id_cell.as_str(), reason));
            report.push(CheckResult::missing(RELEASE_CELL, settings.release_id_cell.as_str(), reason));
            return Ok(report);
        }

        let mut best = 0;
        let mut qualifying = None;
        for part in &ctx.model.embedded {
            let workbook = Workbook::open(part.bytes.clone())?;
            let sheets = matching_sheets(&workbook, &settings.sheet_allow_list, minimum.max(1));
            log::debug!("{}: matching sheets {:?}", part.display_name(), sheets);
            let count = sheets.len();
            let first = sheets.first().map(|s| s.to_string());
            best = best.max(count);
            if count >= minimum
                && let Some(sheet) = first
            {
                qualifying = Some(Qualifying {
                    part,
                    workbook,
                    sheet,
                    count,
                });
                break;
            }
        }

        let Some(found) = qualifying else {
            report.push(CheckResult::mismatched(
                SHEETS,
                format!("{} of {}", best, minimum),
                expected_sheets,
                "insufficient matching sheets",
            ));
            let reason = "no spreadsheet with enough matching sheets";
            report.push(CheckResult::missing(PROJECT_CELL, settings.project_id_cell.as_str(), reason));
            report.push(CheckResult::missing(RELEASE_CELL, settings.release_id_cell.as_str(), reason));
            return Ok(report);
        };

        report.push(CheckResult::matched(
            SHEETS,
            format!("{}: {} sheets", found.part.display_name(), found.count),
            expected_sheets,
        ));
        for (rule, cell, field) in [
            (PROJECT_CELL, &settings.project_id_cell, "Project ID"),
            (RELEASE_CELL, &settings.release_id_cell, "Release ID"),
        ] {
            let value = found.workbook.read_cell_ref(&found.sheet, cell).trim();
            let check = match ctx.expected(field) {
                None => CheckResult::warning(rule, value, format!("no {} configured", field)),
                Some(expected) => CheckResult::compare(
                    rule,
                    values_match(value, &expected),
                    value,
                    expected.as_str(),
                    format!("cell mismatch at {}!{}", found.sheet, cell),
                ),
            };
            report.push(check);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DocumentProfile;
    use crate::common::error::Error;
    use crate::document::DocumentModel;
    use crate::ooxml::xlsx::workbook::tests::build_xlsx;
    use crate::validate::config::{ReleaseRecord, ValidationConfig};
    use crate::validate::report::CheckStatus;
    use crate::validate::rules::tests::context;
    use crate::validate::settings::EngineSettings;
    use bytes::Bytes;

    fn part(name: &str, bytes: Vec<u8>) -> EmbeddedPart {
        EmbeddedPart {
            physical_name: format!("word/embeddings/{}", name),
            bytes: Bytes::from(bytes),
            relationship_id: None,
            resolved_title: None,
        }
    }

    fn model(parts: Vec<EmbeddedPart>) -> DocumentModel {
        let mut model = DocumentModel::empty(DocumentProfile::Word);
        model.embedded = parts;
        model
    }

    fn record() -> ReleaseRecord {
        ReleaseRecord {
            project_id: "PRJ-9".to_string(),
            release_id: "ER-77".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_insufficient_sheets_reported_before_cells() {
        let workbook = build_xlsx(&[
            ("Summary", &[("A2", "PRJ-9")]),
            ("Notes", &[]),
            ("Logs", &[]),
            ("Misc", &[]),
        ]);
        let model = model(vec![part("Book1.xlsx", workbook)]);
        let config = ValidationConfig::default();
        let settings = EngineSettings::default();
        let record = record();
        let report = EmbeddedSpreadsheetRule
            .evaluate(&context(&model, &config, Some(&record), &settings))
            .unwrap();

        let sheets = report.check(SHEETS).unwrap();
        assert_eq!(sheets.status, CheckStatus::Mismatched);
        assert_eq!(sheets.reason, "insufficient matching sheets");
        assert_eq!(sheets.found, "2 of 3");
        assert_eq!(report.check(PROJECT_CELL).unwrap().status, CheckStatus::Missing);
    }

    #[test]
    fn test_first_qualifying_part_cells() {
        let weak = build_xlsx(&[("Summary", &[])]);
        let strong = build_xlsx(&[
            ("Cover", &[("A2", "wrong")]),
            ("SUMMARY", &[("A2", "prj-9"), ("B8", "ER-70")]),
            ("Contacts", &[]),
            ("Test Data", &[]),
        ]);
        let model = model(vec![part("Book1.xlsx", weak), part("Book2.xlsx", strong)]);
        let config = ValidationConfig::default();
        let settings = EngineSettings::default();
        let record = record();
        let report = EmbeddedSpreadsheetRule
            .evaluate(&context(&model, &config, Some(&record), &settings))
            .unwrap();

        assert_eq!(report.check(SHEETS).unwrap().status, CheckStatus::Matched);
        assert_eq!(report.check(PROJECT_CELL).unwrap().status, CheckStatus::Matched);
        let release = report.check(RELEASE_CELL).unwrap();
        assert_eq!(release.status, CheckStatus::Mismatched);
        assert_eq!(release.found, "ER-70");
        assert!(release.reason.starts_with("cell mismatch"));
    }

    #[test]
    fn test_no_embedded_part() {
        let model = model(Vec::new());
        let config = ValidationConfig::default();
        let settings = EngineSettings::default();
        let report = EmbeddedSpreadsheetRule.evaluate(&context(&model, &config, None, &settings)).unwrap();
        assert!(report.checks.iter().all(|c| c.status == CheckStatus::Missing));
    }

    #[test]
    fn test_corrupt_spreadsheet_is_fatal() {
        let model = model(vec![part("Book1.xlsx", b"not a zip".to_vec())]);
        let config = ValidationConfig::default();
        let settings = EngineSettings::default();
        let result = EmbeddedSpreadsheetRule.evaluate(&context(&model, &config, None, &settings));
        assert!(matches!(result, Err(Error::CorruptSpreadsheet(_))));
    }
}
