//! Presentation slide rules: the summary slide and observation slides.

use super::{RuleContext, RuleEvaluator};
use crate::common::error::Result;
use crate::common::normalize::normalize;
use crate::document::{Slide, Table};
use crate::validate::report::{Category, CategoryReport, CheckResult};
use regex::RegexBuilder;

const HEADER: &str = "Header";
const SUMMARY_RELEASE: &str = "Summary release ID";
const SUMMARY_PROJECT: &str = "Summary project name";
const EXECUTION: &str = "Execution table";
const ATTACHMENT: &str = "Attachment";

/// Whether `text` contains `word` as a whole word, ignoring case.
pub fn contains_word(text: &str, word: &str) -> bool {
    let word = word.trim();
    if word.is_empty() {
        return false;
    }
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
        .case_insensitive(true)
        .build()
        .is_ok_and(|re| re.is_match(text))
}

/// Slide 2: header, summary, execution table and attachment.
#[derive(Debug, Default)]
pub struct SlideSummaryRule;

/// How far the best execution-table row got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RowOutcome {
    NoTestType,
    NoDates,
    Complete,
}

fn row_outcome(cells: &[&str], test_types: &[String]) -> RowOutcome {
    let kind = cells.first().map(|c| normalize(c)).unwrap_or_default();
    if !test_types.iter().any(|t| normalize(t) == kind) {
        return RowOutcome::NoTestType;
    }
    let dated = |i: usize| cells.get(i).is_some_and(|c| !c.trim().is_empty());
    if dated(1) && dated(2) {
        RowOutcome::Complete
    } else {
        RowOutcome::NoDates
    }
}

fn execution_check(tables: &[Table], test_types: &[String]) -> CheckResult {
    let expected = "test type with start and end dates";
    let best = tables
        .iter()
        .flat_map(|t| t.rows().iter().skip(1))
        .map(|row| (row_outcome(&row.texts(), test_types), row.texts().join(" | ")))
        .max_by_key(|(outcome, _)| *outcome);

    match best {
        None if tables.is_empty() => CheckResult::missing(EXECUTION, expected, "execution table not found"),
        None => CheckResult::mismatched(EXECUTION, "", expected, "test type missing"),
        Some((RowOutcome::Complete, row)) => CheckResult::matched(EXECUTION, row, expected),
        Some((RowOutcome::NoDates, row)) => CheckResult::mismatched(EXECUTION, row, expected, "dates missing"),
        Some((RowOutcome::NoTestType, row)) => CheckResult::mismatched(EXECUTION, row, expected, "test type missing"),
    }
}

fn has_extension(name: &str, extensions: &[String]) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    })
}

fn shape_text<'a>(slide: &'a Slide, name: &str) -> Option<&'a str> {
    slide.shape(name).map(|s| s.text.trim())
}

impl RuleEvaluator for SlideSummaryRule {
    fn category(&self) -> Category {
        Category::SlideSummary
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(self.category());
        let settings = &ctx.settings.presentation;

        let Some(slide) = ctx.model.slide(2) else {
            let reason = "slide 2 not found";
            for rule in [HEADER, SUMMARY_RELEASE, SUMMARY_PROJECT, EXECUTION, ATTACHMENT] {
                report.push(CheckResult::missing(rule, "", reason));
            }
            return Ok(report);
        };

        let project = ctx.expected("Project Name");
        let release = ctx.expected("Release ID");

        report.push(match (shape_text(slide, &settings.header_shape), &project) {
            (_, None) => CheckResult::warning(HEADER, "", "no project name configured"),
            (None, Some(p)) => CheckResult::missing(HEADER, p.as_str(), format!("shape {} not found", settings.header_shape)),
            (Some(text), Some(p)) => {
                CheckResult::compare(HEADER, contains_word(text, p), text, p.as_str(), "header does not name the project")
            },
        });

        let summary = shape_text(slide, &settings.summary_shape);
        for (rule, expected, what) in [
            (SUMMARY_RELEASE, &release, "release id"),
            (SUMMARY_PROJECT, &project, "project name"),
        ] {
            report.push(match (summary, expected) {
                (_, None) => CheckResult::warning(rule, summary.unwrap_or_default(), format!("no {} configured", what)),
                (None, Some(e)) => {
                    CheckResult::missing(rule, e.as_str(), format!("shape {} not found", settings.summary_shape))
                },
                (Some(text), Some(e)) => CheckResult::compare(
                    rule,
                    normalize(text).contains(&normalize(e)),
                    text,
                    e.as_str(),
                    format!("summary does not mention the {}", what),
                ),
            });
        }

        report.push(execution_check(&slide.tables, &settings.test_types));

        let attachment = slide
            .embedded
            .iter()
            .map(String::as_str)
            .find(|name| has_extension(name, &settings.attachment_extensions))
            .or_else(|| ctx.model.embedded.first().map(|p| p.display_name()));
        report.push(match attachment {
            Some(name) => CheckResult::matched(ATTACHMENT, name, "embedded spreadsheet"),
            None => CheckResult::missing(ATTACHMENT, "embedded spreadsheet", "no embedded spreadsheet"),
        });
        Ok(report)
    }
}

/// Slides 3 onward: each needs a title and observations.
#[derive(Debug, Default)]
pub struct SlideObservationsRule;

impl RuleEvaluator for SlideObservationsRule {
    fn category(&self) -> Category {
        Category::SlideObservations
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CategoryReport> {
        let mut report = CategoryReport::new(self.category());
        let settings = &ctx.settings.presentation;
        let slides: Vec<&Slide> = ctx.model.slides.iter().filter(|s| s.number >= 3).collect();
        if slides.is_empty() {
            report.push(CheckResult::missing("Observation slides", "slides from 3 on", "no observation slides"));
            return Ok(report);
        }

        for slide in slides {
            for shape in [&settings.title_shape, &settings.observations_shape] {
                let rule = format!("Slide {} {}", slide.number, shape);
                report.push(match shape_text(slide, shape) {
                    None => CheckResult::missing(rule, "non-blank text", format!("shape {} not found", shape)),
                    Some(text) => CheckResult::compare(rule, !text.is_empty(), text, "non-blank text", "shape is blank"),
                });
            }
        }
        Ok(report)
    }
}
