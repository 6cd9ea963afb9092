//! Expected section headings.

use super::{RuleContext, RuleEvaluator};
use crate::common::error::Result;
use crate::common::normalize::normalize_section;
use crate::validate::report::{Category, CategoryReport, CheckResult};
use std::collections::HashSet;

/// Each configured section must appear among the document's headings.
#[derive(Debug, Default)]
pub struct SectionsRule;

impl RuleEvaluator for SectionsRule {
    fn category(&self) -> Category {
        Category::Sections
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(self.category());
        let expected = ctx.config.sections();
        if expected.is_empty() {
            report.push(CheckResult::warning("Sections", "", "no sections configured"));
            return Ok(report);
        }

        let wanted: HashSet<String> = expected.iter().map(|s| normalize_section(s)).collect();
        for name in expected {
            let key = normalize_section(name);
            match ctx.model.headings.iter().find(|h| h.normalized == key) {
                Some(heading) => report.push(CheckResult::matched(name.as_str(), heading.name.as_str(), name.as_str())),
                None => report.push(CheckResult::missing(name.as_str(), name.as_str(), "section not found")),
            }
        }

        report.extras = ctx
            .model
            .headings
            .iter()
            .filter(|h| !wanted.contains(&h.normalized))
            .map(|h| h.name.clone())
            .collect();
        log::debug!("sections: {} expected, {} extra headings", expected.len(), report.extras.len());
        Ok(report)
    }
}
