//! Validate a Word document or presentation and print the report
//!
//! # Usage
//!
//! ```bash
//! # Expectations from a config workbook, identifiers from row 3 of a release list
//! cargo run --example validate -- plan.docx --config-workbook config.xlsx --config-sheet Word \
//!     --releases releases.xlsx --release-row 3
//!
//! # Expectations from YAML, custom thresholds, tab-separated export
//! cargo run --example validate -- status.pptx --config-yaml expected.yaml --settings settings.yaml --export
//! ```

use clap::Parser;
use docvet::ooxml::xlsx::Workbook;
use docvet::validate::ValidationRequest;
use docvet::{EngineSettings, ReleaseRecord, ValidationConfig, Validator};
use std::path::PathBuf;
use std::process::ExitCode;

/// Check an OOXML document against expected sections and identifiers
#[derive(Parser, Debug)]
#[command(name = "validate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Document to validate (.docx or .pptx)
    document: PathBuf,

    /// Engine settings YAML; defaults apply to anything it leaves out
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Workbook holding a Key/Value config sheet
    #[arg(long, conflicts_with = "config_yaml")]
    config_workbook: Option<PathBuf>,

    /// Sheet of the config workbook
    #[arg(long, default_value = "Config")]
    config_sheet: String,

    /// Key/Value config as YAML
    #[arg(long)]
    config_yaml: Option<PathBuf>,

    /// Release-list workbook
    #[arg(long, requires = "release_row")]
    releases: Option<PathBuf>,

    /// Sheet of the release-list workbook
    #[arg(long, default_value = "Releases")]
    release_sheet: String,

    /// 1-based data row of the release list to validate against
    #[arg(long)]
    release_row: Option<usize>,

    /// Print tab-separated (Section, Result) rows instead of the report
    #[arg(long)]
    export: bool,
}

fn load_config(args: &Args) -> docvet::Result<ValidationConfig> {
    if let Some(path) = &args.config_workbook {
        let workbook = Workbook::open_path(path)?;
        return ValidationConfig::from_workbook(&workbook, &args.config_sheet);
    }
    if let Some(path) = &args.config_yaml {
        return ValidationConfig::from_yaml(&std::fs::read_to_string(path)?);
    }
    Ok(ValidationConfig::default())
}

fn load_record(args: &Args) -> docvet::Result<Option<ReleaseRecord>> {
    let (Some(path), Some(row)) = (&args.releases, args.release_row) else {
        return Ok(None);
    };
    let workbook = Workbook::open_path(path)?;
    let records = ReleaseRecord::list_from_workbook(&workbook, &args.release_sheet)?;
    let record = row.checked_sub(1).and_then(|index| records.get(index)).cloned();
    if record.is_none() {
        return Err(docvet::Error::InvalidConfig(format!(
            "release row {} out of range (1..={})",
            row,
            records.len()
        )));
    }
    Ok(record)
}

fn run(args: &Args) -> docvet::Result<bool> {
    let settings = match &args.settings {
        Some(path) => EngineSettings::from_yaml(&std::fs::read_to_string(path)?)?,
        None => EngineSettings::default(),
    };
    let validator = Validator::new(settings)?;

    let mut request = ValidationRequest::new(load_config(args)?);
    if let Some(record) = load_record(args)? {
        request = request.with_record(record);
    }

    let report = validator.validate_path(&args.document, &request)?;
    if args.export {
        println!("Section\tResult");
        for (section, line) in report.export_rows() {
            println!("{}\t{}", section, line);
        }
    } else {
        print!("{}", report);
    }
    Ok(report.status() == docvet::validate::CheckStatus::Matched)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        },
    }
}
