//! The validation run: extract once, evaluate categories in order.

use super::config::{ReleaseRecord, ValidationConfig};
use super::report::ValidationReport;
use super::rules::{
    EmbeddedSpreadsheetRule, Page1Rule, RevisionRule, RuleContext, RuleEvaluator, SectionsRule,
    SlideFieldsRule, SlideObservationsRule, SlideSummaryRule, TocRule,
};
use super::settings::EngineSettings;
use crate::common::DocumentProfile;
use crate::common::error::{Error, Result};
use crate::document::{DocumentModel, extract_profile};
use crate::ooxml::opc::Container;
use bytes::Bytes;
use chrono::{Local, NaiveDate};
use std::path::Path;

/// Inputs of one run besides the document itself.
#[derive(Debug, Clone, Default)]
pub struct ValidationRequest {
    /// Name used in the report, usually the file name
    pub name: String,
    pub config: ValidationConfig,
    pub record: Option<ReleaseRecord>,
    /// Detected from the package when absent
    pub profile: Option<DocumentProfile>,
    /// Today when absent
    pub reference_date: Option<NaiveDate>,
}

impl ValidationRequest {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_record(mut self, record: ReleaseRecord) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_profile(mut self, profile: DocumentProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}

/// Validates documents against one set of settings.
///
/// A `Validator` holds nothing but immutable settings, so one instance can
/// serve concurrent runs.
///
/// # Example
///
/// ```rust,no_run
/// use docvet::validate::{EngineSettings, ValidationConfig, ValidationRequest, Validator};
///
/// let validator = Validator::new(EngineSettings::default())?;
/// let config = ValidationConfig::from_pairs([("Sections", "Overview, Scope")]);
/// let report = validator.validate_path("plan.docx", &ValidationRequest::new(config))?;
/// for (section, line) in report.export_rows() {
///     println!("{}\t{}", section, line);
/// }
/// # Ok::<(), docvet::common::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    settings: EngineSettings,
}

impl Validator {
    /// # Errors
    /// [`Error::InvalidConfig`] when a pattern or cell reference in `settings` is invalid.
    pub fn new(settings: EngineSettings) -> Result<Self> {
        settings.check()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Rule categories for `profile`, in report order.
    pub fn rules(profile: DocumentProfile) -> Vec<Box<dyn RuleEvaluator>> {
        match profile {
            DocumentProfile::Word => vec![
                Box::new(SectionsRule),
                Box::new(RevisionRule),
                Box::new(Page1Rule),
                Box::new(TocRule),
                Box::new(EmbeddedSpreadsheetRule),
            ],
            DocumentProfile::Presentation => vec![
                Box::new(SlideFieldsRule),
                Box::new(SlideSummaryRule),
                Box::new(SlideObservationsRule),
            ],
        }
    }

    /// Extract the document model without evaluating rules.
    pub fn extract(&self, bytes: impl Into<Bytes>, profile: Option<DocumentProfile>) -> Result<DocumentModel> {
        let container = Container::open(bytes)?;
        let profile = profile
            .or_else(|| DocumentProfile::detect(&container))
            .ok_or_else(|| Error::CorruptArchive("neither a Word document nor a presentation".to_string()))?;
        log::debug!("extracting as {}", profile);
        extract_profile(&container, profile, &self.settings.extract_options())
    }

    /// Validate a document held in memory.
    ///
    /// # Errors
    /// Fatal input problems abort the run: [`Error::CorruptArchive`],
    /// [`Error::MalformedXml`] and [`Error::CorruptSpreadsheet`]. No partial
    /// report is produced.
    pub fn validate(&self, bytes: impl Into<Bytes>, request: &ValidationRequest) -> Result<ValidationReport> {
        let name = if request.name.is_empty() { "document" } else { request.name.as_str() };
        log::info!("validating {}", name);

        let model = self.extract(bytes, request.profile)?;
        let report = self.evaluate(&model, request)?;

        log::info!(
            "validated {}: {} in {} categories, {} checks",
            name,
            report.status(),
            report.categories().len(),
            report.check_count()
        );
        Ok(report)
    }

    /// Validate a document on disk; the file name becomes the report name.
    pub fn validate_path<P: AsRef<Path>>(&self, path: P, request: &ValidationRequest) -> Result<ValidationReport> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut request = request.clone();
        if request.name.is_empty() {
            request.name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        self.validate(data, &request)
    }

    /// Evaluate every category of the model's profile.
    pub fn evaluate(&self, model: &DocumentModel, request: &ValidationRequest) -> Result<ValidationReport> {
        let ctx = RuleContext {
            model,
            config: &request.config,
            record: request.record.as_ref(),
            settings: &self.settings,
            reference_date: request.reference_date.unwrap_or_else(|| Local::now().date_naive()),
        };

        let mut report = ValidationReport::new(request.name.as_str());
        for rule in Self::rules(model.profile) {
            let category = rule.evaluate(&ctx)?;
            log::debug!("{}: {}", category.category, category.status());
            report.push(category);
        }
        Ok(report)
    }
}
