mod common;

use chrono::NaiveDate;
use common::{pptx, shape, slide_table, xlsx};
use docvet::validate::{Category, CheckStatus, ValidationRequest};
use docvet::{DocumentProfile, ReleaseRecord, ValidationConfig, Validator};

fn record() -> ReleaseRecord {
    ReleaseRecord {
        release_id: "ER-77".to_string(),
        release_name: "Spring Drop".to_string(),
        project_id: "PRJ-9".to_string(),
        project_name: "Apollo".to_string(),
        application_id: "123".to_string(),
        application_name: "Payments".to_string(),
    }
}

fn request() -> ValidationRequest {
    ValidationRequest::new(ValidationConfig::default())
        .with_name("results.pptx")
        .with_record(record())
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
}

fn cover() -> String {
    [
        shape("Slide1ProjectName", "Project Name: Apollo"),
        shape("Slide1ProjectID", "Project ID: PRJ-9"),
        shape("Slide1AppID", "Application ID: AppID-123"),
        shape("Slide1ApplicationName", "Application Name: Payments"),
        shape("Slide1ReleaseName", "Release Name: Spring Drop"),
    ]
    .concat()
}

fn summary(test_type: &str, end: &str) -> String {
    [
        shape("Slide2Header", "Apollo Performance Test Results"),
        shape("Slide2Summary", "Release ER-77 of Apollo met its targets"),
        slide_table(&[&["Test Type", "Start", "End"], &[test_type, "01-Mar-2024", end]]),
    ]
    .concat()
}

fn observation(title: &str, text: &str) -> String {
    [shape("Title", title), shape("Observations", text)].concat()
}

#[test]
fn test_conforming_presentation() {
    let data = pptx(
        &[
            cover(),
            summary("Load Test", "05-Mar-2024"),
            observation("Response times", "p95 under 300 ms"),
            observation("Throughput", "Sustained 1200 tps"),
        ],
        Some(("Microsoft_Excel_Worksheet.xlsx", xlsx(&[("Summary", &[])]))),
    );
    let report = Validator::default().validate(data, &request()).unwrap();

    let categories: Vec<Category> = report.categories().iter().map(|c| c.category).collect();
    assert_eq!(
        categories,
        vec![Category::Page1Fields, Category::SlideSummary, Category::SlideObservations]
    );
    for category in report.categories() {
        for check in &category.checks {
            assert_eq!(check.status, CheckStatus::Matched, "{}: {}", category.category, check);
        }
    }
    assert_eq!(report.category(Category::SlideObservations).unwrap().checks.len(), 4);
}

#[test]
fn test_presentation_failures() {
    let data = pptx(
        &[
            [shape("Slide1ProjectName", "Project Name: Hermes")].concat(),
            summary("Spike", ""),
            observation("Response times", " "),
        ],
        None,
    );
    let report = Validator::default().validate(data, &request()).unwrap();

    let fields = report.category(Category::Page1Fields).unwrap();
    assert_eq!(fields.check("Project Name").unwrap().status, CheckStatus::Mismatched);
    assert_eq!(fields.check("Project ID").unwrap().status, CheckStatus::Missing);

    let summary = report.category(Category::SlideSummary).unwrap();
    assert_eq!(summary.check("Execution table").unwrap().reason, "test type missing");
    assert_eq!(summary.check("Attachment").unwrap().status, CheckStatus::Missing);
    assert_eq!(summary.check("Header").unwrap().status, CheckStatus::Matched);

    let observations = report.category(Category::SlideObservations).unwrap();
    assert_eq!(observations.check("Slide 3 Observations").unwrap().status, CheckStatus::Mismatched);
    assert_eq!(report.status(), CheckStatus::Mismatched);
}

#[test]
fn test_explicit_profile_skips_detection() {
    let data = pptx(&[cover()], None);
    let model = Validator::default()
        .extract(data, Some(DocumentProfile::Presentation))
        .unwrap();
    assert_eq!(model.slides.len(), 1);
    assert_eq!(model.page_text(1).lines().count(), 5);
}
