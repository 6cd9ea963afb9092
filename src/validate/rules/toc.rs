//! Expected sections in the table of contents.

use super::{RuleContext, RuleEvaluator};
use crate::common::error::Result;
use crate::common::normalize::normalize_section;
use crate::validate::report::{Category, CategoryReport, CheckResult};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct TocRule;

impl RuleEvaluator for TocRule {
    fn category(&self) -> Category {
        Category::TableOfContents
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(self.category());
        let expected = ctx.config.sections();
        if expected.is_empty() {
            report.push(CheckResult::warning("Table of Contents", "", "no sections configured"));
            return Ok(report);
        }

        let entries: Vec<(String, &str)> = ctx
            .model
            .toc
            .iter()
            .map(|e| (normalize_section(&e.name), e.name.as_str()))
            .collect();
        let reason = if entries.is_empty() {
            "table of contents not found"
        } else {
            "not in table of contents"
        };

        for name in expected {
            let key = normalize_section(name);
            match entries.iter().find(|(normalized, _)| *normalized == key) {
                Some((_, found)) => report.push(CheckResult::matched(name.as_str(), *found, name.as_str())),
                None => report.push(CheckResult::missing(name.as_str(), name.as_str(), reason)),
            }
        }

        let wanted: HashSet<String> = expected.iter().map(|s| normalize_section(s)).collect();
        report.extras = entries
            .iter()
            .filter(|(normalized, _)| !wanted.contains(normalized))
            .map(|(_, name)| name.to_string())
            .collect();
        Ok(report)
    }
}
