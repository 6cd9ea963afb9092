//! Validation outcomes.
//!
//! A [`ValidationReport`] holds one [`CategoryReport`] per evaluated
//! category, in evaluation order. Every configured rule produces exactly one
//! [`CheckResult`]; non-fatal problems are statuses, never errors.

use serde::Serialize;
use std::fmt;

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckStatus {
    Matched,
    Mismatched,
    /// The structure or value the check needs is absent from the document
    Missing,
    /// The expected value is absent from the configuration
    Warning,
}

impl CheckStatus {
    /// Precedence used when folding checks into a category status.
    fn severity(self) -> u8 {
        match self {
            CheckStatus::Matched => 0,
            CheckStatus::Warning => 1,
            CheckStatus::Missing => 2,
            CheckStatus::Mismatched => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Matched => "Matched",
            CheckStatus::Mismatched => "Mismatched",
            CheckStatus::Missing => "Missing",
            CheckStatus::Warning => "Warning",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One rule's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub rule: String,
    pub status: CheckStatus,
    pub found: String,
    pub expected: String,
    pub reason: String,
}

impl CheckResult {
    pub fn new(
        rule: impl Into<String>,
        status: CheckStatus,
        found: impl Into<String>,
        expected: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            status,
            found: found.into(),
            expected: expected.into(),
            reason: reason.into(),
        }
    }

    pub fn matched(rule: impl Into<String>, found: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(rule, CheckStatus::Matched, found, expected, "ok")
    }

    pub fn mismatched(
        rule: impl Into<String>,
        found: impl Into<String>,
        expected: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(rule, CheckStatus::Mismatched, found, expected, reason)
    }

    pub fn missing(rule: impl Into<String>, expected: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(rule, CheckStatus::Missing, "", expected, reason)
    }

    pub fn warning(rule: impl Into<String>, found: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(rule, CheckStatus::Warning, found, "", reason)
    }

    /// Matched when `ok`, else Mismatched with `reason`.
    pub fn compare(
        rule: impl Into<String>,
        ok: bool,
        found: impl Into<String>,
        expected: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        if ok {
            Self::matched(rule, found, expected)
        } else {
            Self::mismatched(rule, found, expected, reason)
        }
    }

    pub fn is_matched(&self) -> bool {
        self.status == CheckStatus::Matched
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: Found '{}', Expected '{}' -> {}",
            self.status, self.rule, self.found, self.expected, self.reason
        )
    }
}

/// Rule categories, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Sections,
    RevisionHistory,
    Page1Fields,
    TableOfContents,
    EmbeddedSpreadsheet,
    SlideSummary,
    SlideObservations,
}

impl Category {
    /// Section label used in exports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Sections => "Sections",
            Category::RevisionHistory => "Revision History",
            Category::Page1Fields => "Page 1 Fields",
            Category::TableOfContents => "Table of Contents",
            Category::EmbeddedSpreadsheet => "Embedded Spreadsheet",
            Category::SlideSummary => "Slide Summary",
            Category::SlideObservations => "Slide Observations",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checks of one category plus informational extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub checks: Vec<CheckResult>,
    /// Document items outside the expected set; they never affect the status
    pub extras: Vec<String>,
}

impl CategoryReport {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            checks: Vec::new(),
            extras: Vec::new(),
        }
    }

    pub fn push(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Worst status among the checks; Matched for a category without checks.
    pub fn status(&self) -> CheckStatus {
        self.checks
            .iter()
            .map(|c| c.status)
            .max_by_key(|s| s.severity())
            .unwrap_or(CheckStatus::Matched)
    }

    /// Check by rule name.
    pub fn check(&self, rule: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.rule == rule)
    }
}

/// The result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub document: String,
    categories: Vec<CategoryReport>,
}

impl ValidationReport {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            categories: Vec::new(),
        }
    }

    pub fn push(&mut self, category: CategoryReport) {
        self.categories.push(category);
    }

    /// Category reports in evaluation order.
    pub fn categories(&self) -> &[CategoryReport] {
        &self.categories
    }

    pub fn category(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Worst status across every category.
    pub fn status(&self) -> CheckStatus {
        self.categories
            .iter()
            .map(CategoryReport::status)
            .max_by_key(|s| s.severity())
            .unwrap_or(CheckStatus::Matched)
    }

    /// Number of checks in the report.
    pub fn check_count(&self) -> usize {
        self.categories.iter().map(|c| c.checks.len()).sum()
    }

    /// Two-column `(Section, Result)` rows: one per check, then one per extra.
    pub fn export_rows(&self) -> Vec<(String, String)> {
        let mut rows = Vec::with_capacity(self.check_count());
        for category in &self.categories {
            let section = category.category.label();
            for check in &category.checks {
                rows.push((section.to_string(), check.to_string()));
            }
            for extra in &category.extras {
                rows.push((section.to_string(), format!("Extra: {}", extra)));
            }
        }
        rows
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.document, self.status())?;
        for category in &self.categories {
            writeln!(f, "[{}] {}", category.category, category.status())?;
            for check in &category.checks {
                writeln!(f, "  {}", check)?;
            }
            for extra in &category.extras {
                writeln!(f, "  Extra: {}", extra)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_display() {
        let check = CheckResult::mismatched("Project ID", "PRJ-1", "PRJ-2", "value differs");
        assert_eq!(
            check.to_string(),
            "Mismatched Project ID: Found 'PRJ-1', Expected 'PRJ-2' -> value differs"
        );
    }

    #[test]
    fn test_category_status_precedence() {
        let mut category = CategoryReport::new(Category::Sections);
        assert_eq!(category.status(), CheckStatus::Matched);

        category.push(CheckResult::matched("Overview", "Overview", "Overview"));
        category.extras.push("Appendix".to_string());
        assert_eq!(category.status(), CheckStatus::Matched);

        category.push(CheckResult::warning("Scope", "", "not configured"));
        assert_eq!(category.status(), CheckStatus::Warning);

        category.push(CheckResult::missing("Scope", "Scope", "section not found"));
        assert_eq!(category.status(), CheckStatus::Missing);

        category.push(CheckResult::mismatched("Scope", "Scop", "Scope", "differs"));
        assert_eq!(category.status(), CheckStatus::Mismatched);
    }

    #[test]
    fn test_export_rows() {
        let mut report = ValidationReport::new("plan.docx");
        let mut sections = CategoryReport::new(Category::Sections);
        sections.push(CheckResult::matched("Overview", "Overview", "Overview"));
        sections.extras.push("Appendix".to_string());
        report.push(sections);
        let mut toc = CategoryReport::new(Category::TableOfContents);
        toc.push(CheckResult::missing("Scope", "Scope", "not in table of contents"));
        report.push(toc);

        let rows = report.export_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].0, "Sections");
        assert_eq!(rows[1], ("Sections".to_string(), "Extra: Appendix".to_string()));
        assert_eq!(rows[2].0, "Table of Contents");
        assert_eq!(report.status(), CheckStatus::Missing);
        assert_eq!(report.check_count(), 2);
    }
}
