//! Rule evaluation over an extracted document model.
//!
//! - [`settings`]: every tunable constant ([`EngineSettings`])
//! - [`config`]: per-run expectations ([`ValidationConfig`], [`ReleaseRecord`])
//! - [`rules`]: one [`RuleEvaluator`](rules::RuleEvaluator) per category
//! - [`report`]: outcomes and the two-column export
//! - [`engine`]: the run itself ([`Validator`])

pub mod config;
pub mod engine;
pub mod report;
pub mod rules;
pub mod settings;

pub use config::{ReleaseRecord, ValidationConfig};
pub use engine::{ValidationRequest, Validator};
pub use report::{Category, CategoryReport, CheckResult, CheckStatus, ValidationReport};
pub use settings::{EngineSettings, FieldPattern};
