//! Revision-history presence, authorship and recency.

use super::{RuleContext, RuleEvaluator};
use crate::common::error::Result;
use crate::document::RevisionRecord;
use crate::validate::report::{Category, CategoryReport, CheckResult};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

const RECORDS: &str = "Revision records";
const AUTHOR: &str = "Author";
const DATE: &str = "Revision date";

/// The revision table must hold a record with an author and a recent date.
#[derive(Debug, Default)]
pub struct RevisionRule;

/// Parse `text` with the first matching format.
pub fn parse_date(text: &str, formats: &[String]) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    formats.iter().find_map(|format| {
        if format.contains("%H") {
            NaiveDateTime::parse_from_str(text, format).ok().map(|dt| dt.date())
        } else {
            NaiveDate::parse_from_str(text, format).ok()
        }
    })
}

impl RuleEvaluator for RevisionRule {
    fn category(&self) -> Category {
        Category::RevisionHistory
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(self.category());
        let settings = &ctx.settings.revision;

        if !ctx.model.revision_table_found {
            let reason = "revision history table not found";
            report.push(CheckResult::missing(RECORDS, "at least one record", reason));
            report.push(CheckResult::missing(AUTHOR, "non-blank author", reason));
            report.push(CheckResult::missing(DATE, "recent revision date", reason));
            return Ok(report);
        }

        let value = |record: &RevisionRecord, column: &str| record.get(column).unwrap_or("").trim().to_string();
        let records: Vec<&RevisionRecord> = ctx
            .model
            .revision_records
            .iter()
            .filter(|r| !value(r, &settings.author_column).is_empty() || !value(r, &settings.date_column).is_empty())
            .collect();

        let Some(first) = records.first() else {
            let reason = "revision table has no records";
            report.push(CheckResult::missing(RECORDS, "at least one record", reason));
            report.push(CheckResult::missing(AUTHOR, "non-blank author", reason));
            report.push(CheckResult::missing(DATE, "recent revision date", reason));
            return Ok(report);
        };
        report.push(CheckResult::matched(
            RECORDS,
            format!("{} records", records.len()),
            "at least one record",
        ));

        let author = value(first, &settings.author_column);
        report.push(CheckResult::compare(
            AUTHOR,
            !author.is_empty(),
            author.as_str(),
            "non-blank author",
            "author is blank",
        ));

        let mut latest: Option<NaiveDate> = None;
        for record in &records {
            let text = value(record, &settings.date_column);
            match parse_date(&text, &settings.date_formats) {
                Some(date) => latest = latest.max(Some(date)),
                None if !text.is_empty() => log::warn!("unparsable revision date {:?}", text),
                None => {},
            }
        }

        let cutoff = recency_cutoff(ctx.reference_date, settings.recency_days);
        let expected = format!("on or after {}", cutoff);
        match latest {
            Some(date) => report.push(CheckResult::compare(
                DATE,
                date >= cutoff,
                date.to_string(),
                expected,
                format!("latest revision is older than {} days", settings.recency_days),
            )),
            None => report.push(CheckResult::mismatched(
                DATE,
                value(first, &settings.date_column),
                expected,
                "revision date could not be parsed",
            )),
        }
        Ok(report)
    }
}

/// Oldest acceptable revision date; a window reaching past the calendar
/// range accepts every date.
fn recency_cutoff(reference: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days.max(0))
        .and_then(|window| reference.checked_sub_signed(window))
        .unwrap_or(NaiveDate::MIN)
}
