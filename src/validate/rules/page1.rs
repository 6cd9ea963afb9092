//! First-page identification fields.
//!
//! Word documents carry the fields as `Label: value` running text at the
//! start of the document; presentations carry them in named shapes on the
//! first slide. Both compare against the selected release record.

use super::{RuleContext, RuleEvaluator, field_matches};
use crate::common::error::Result;
use crate::common::normalize::normalize;
use crate::validate::report::{Category, CategoryReport, CheckResult};

const FOOTER: &str = "Footer";

/// Leading running text of a Word document: every run joined with spaces,
/// cut to `window_chars` characters.
pub fn leading_text(ctx: &RuleContext<'_>) -> String {
    let window = ctx.settings.page1.window_chars;
    let joined = ctx
        .model
        .blocks
        .iter()
        .flat_map(|b| b.runs())
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().take(window).collect::<String>().trim().to_string()
}

/// Word first-page fields and the footer check.
#[derive(Debug, Default)]
pub struct Page1Rule;

impl RuleEvaluator for Page1Rule {
    fn category(&self) -> Category {
        Category::Page1Fields
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(self.category());
        let text = leading_text(ctx);

        for pattern in &ctx.settings.page1.fields {
            if !ctx.is_mandatory(&pattern.field) {
                continue;
            }
            let found = pattern
                .regex()?
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string());

            let check = match (found, ctx.expected(&pattern.field)) {
                (found, None) => CheckResult::warning(
                    pattern.field.as_str(),
                    found.unwrap_or_default(),
                    "no expected value configured",
                ),
                (None, Some(expected)) => {
                    CheckResult::missing(pattern.field.as_str(), expected, "Key not found in document")
                },
                (Some(found), Some(expected)) => CheckResult::compare(
                    pattern.field.as_str(),
                    field_matches(&pattern.field, &found, &expected),
                    found.as_str(),
                    expected.as_str(),
                    "value differs",
                ),
            };
            report.push(check);
        }

        report.push(footer_check(ctx));
        Ok(report)
    }
}

/// The footer must mention the project name.
fn footer_check(ctx: &RuleContext<'_>) -> CheckResult {
    let Some(project) = ctx.expected("Project Name") else {
        return CheckResult::warning(FOOTER, ctx.model.footer_text.as_str(), "no project name configured");
    };
    let footer = ctx.model.footer_text.trim();
    if footer.is_empty() {
        return CheckResult::missing(FOOTER, project, "footer not found");
    }
    CheckResult::compare(
        FOOTER,
        normalize(footer).contains(&normalize(&project)),
        footer,
        project.as_str(),
        "footer does not contain the project name",
    )
}

/// Presentation first-slide fields, read from named shapes.
#[derive(Debug, Default)]
pub struct SlideFieldsRule;

/// Text after the last `:` of a shape, or all of it when there is none.
pub fn shape_value(text: &str) -> &str {
    text.rsplit_once(':').map_or(text, |(_, value)| value).trim()
}

impl RuleEvaluator for SlideFieldsRule {
    fn category(&self) -> Category {
        Category::Page1Fields
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(self.category());
        let slide = ctx.model.slide(1);

        for (shape_name, field) in &ctx.settings.presentation.slide1_fields {
            if !ctx.is_mandatory(field) {
                continue;
            }
            let found = slide.and_then(|s| s.shape(shape_name)).map(|shape| shape_value(&shape.text));
            let check = match (found, ctx.expected(field)) {
                (found, None) => {
                    CheckResult::warning(field.as_str(), found.unwrap_or_default(), "no expected value configured")
                },
                (None, Some(expected)) => {
                    CheckResult::missing(field.as_str(), expected, format!("shape {} not found", shape_name))
                },
                (Some(found), Some(expected)) => CheckResult::compare(
                    field.as_str(),
                    field_matches(field, found, &expected),
                    found,
                    expected.as_str(),
                    "value differs",
                ),
            };
            report.push(check);
        }
        Ok(report)
    }
}
