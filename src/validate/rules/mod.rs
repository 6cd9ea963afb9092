//! Rule evaluators, one per report category.
//!
//! Every evaluator is total over its configured rules: missing structures
//! and unconfigured values become check outcomes. Only unreadable inputs
//! (a corrupt embedded spreadsheet, say) are returned as errors.

pub mod embedded;
pub mod page1;
pub mod revision;
pub mod sections;
pub mod slides;
pub mod toc;

pub use embedded::EmbeddedSpreadsheetRule;
pub use page1::{Page1Rule, SlideFieldsRule};
pub use revision::RevisionRule;
pub use sections::SectionsRule;
pub use slides::{SlideObservationsRule, SlideSummaryRule};
pub use toc::TocRule;

use super::config::{ReleaseRecord, ValidationConfig};
use super::report::{Category, CategoryReport};
use super::settings::EngineSettings;
use crate::common::error::Result;
use crate::common::normalize::{app_id_equivalent, normalize_key, values_match};
use crate::document::DocumentModel;
use chrono::NaiveDate;

/// Everything a rule may look at during one run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub model: &'a DocumentModel,
    pub config: &'a ValidationConfig,
    pub record: Option<&'a ReleaseRecord>,
    pub settings: &'a EngineSettings,
    /// "Today" for recency checks
    pub reference_date: NaiveDate,
}

impl RuleContext<'_> {
    /// Expected value of a record field.
    ///
    /// The selected record wins; otherwise the configuration is searched
    /// for `field`, `Page1_<field>` and `Page_1_<field>`. Blank values count
    /// as absent.
    pub fn expected(&self, field: &str) -> Option<String> {
        if let Some(value) = self.record.and_then(|r| r.field(field))
            && !value.trim().is_empty()
        {
            return Some(value.trim().to_string());
        }
        let keys = [field.to_string(), format!("Page1_{}", field), format!("Page_1_{}", field)];
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        let value = self.config.get_any(&keys).map(str::to_string);
        if value.is_none() {
            log::warn!("no expected value configured for {:?}", field);
        }
        value
    }

    /// Whether the first-page rules should check `field`.
    pub fn is_mandatory(&self, field: &str) -> bool {
        self.config
            .mandatory_fields()
            .is_none_or(|fields| fields.contains(&normalize_key(field)))
    }
}

/// Compare a captured field value, applying the Application ID equivalence
/// to that field only.
pub(crate) fn field_matches(field: &str, found: &str, expected: &str) -> bool {
    if normalize_key(field) == "applicationid" {
        app_id_equivalent(found, expected)
    } else {
        values_match(found, expected)
    }
}

/// One report category.
pub trait RuleEvaluator: Send + Sync {
    fn category(&self) -> Category;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<CategoryReport>;
}
