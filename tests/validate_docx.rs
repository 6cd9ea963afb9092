mod common;

use chrono::NaiveDate;
use common::{docx, paragraph, table, xlsx};
use docvet::document::{ExtractOptions, extract};
use docvet::validate::{Category, CheckStatus, ValidationRequest};
use docvet::{DocumentProfile, Error, ReleaseRecord, ValidationConfig, Validator};

fn release_workbook(project_id: &str) -> Vec<u8> {
    xlsx(&[
        ("Summary", &[("A2", project_id), ("B8", "ER-77")]),
        ("Notes", &[]),
        ("Logs", &[]),
        ("Contacts", &[]),
    ])
}

fn release_plan(revision_date: &str, project_id_cell: &str) -> Vec<u8> {
    let body = [
        paragraph(None, false, "Project Name: Apollo"),
        paragraph(None, false, "Release: Spring Drop"),
        paragraph(None, false, "Project ID: PRJ-9"),
        paragraph(None, false, "Enterprise Release ID: ER-77"),
        paragraph(None, false, "Application Name: Payments"),
        paragraph(None, false, "Application ID: 123"),
        paragraph(None, false, "Document Change History and Management"),
        table(
            &[
                &["Document Change History"],
                &["Revision Number", "Author", "Revision Date"],
                &["1", "Jane Doe", revision_date],
                &["", "", ""],
            ],
            3,
        ),
        paragraph(None, false, "Page 1"),
        paragraph(Some("TOC1"), false, "1 Overview 3"),
        paragraph(Some("TOC1"), false, "2 Scope 4"),
        paragraph(Some("TOC1"), false, "3 Appendix 9"),
        paragraph(None, false, "Page 2"),
        paragraph(Some("Heading1"), false, "Overview"),
        paragraph(None, false, "The release adds card payments."),
        paragraph(None, true, "Scope"),
        paragraph(Some("Heading1"), false, "Appendix"),
    ]
    .concat();
    docx(
        &body,
        "Apollo | Confidential",
        &[("Microsoft_Excel_Worksheet1.xlsx", release_workbook(project_id_cell))],
    )
}

fn record() -> ReleaseRecord {
    ReleaseRecord {
        release_id: "ER-77".to_string(),
        release_name: "Spring Drop".to_string(),
        project_id: "PRJ-9".to_string(),
        project_name: "Apollo".to_string(),
        application_id: "AppID-123".to_string(),
        application_name: "Payments".to_string(),
    }
}

fn request() -> ValidationRequest {
    ValidationRequest::new(ValidationConfig::from_pairs([("Sections", "Overview, Scope")]))
        .with_name("release-plan.docx")
        .with_record(record())
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
}

#[test]
fn test_extract_word_model() {
    let model = extract(release_plan("2024-03-12", "PRJ-9"), &ExtractOptions::default()).unwrap();

    assert_eq!(model.profile, DocumentProfile::Word);
    assert_eq!(model.pages.len(), 3);
    let headings: Vec<&str> = model.headings.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(headings, vec!["Overview", "Scope", "Appendix"]);
    let toc: Vec<(usize, &str)> = model.toc.iter().map(|e| (e.level, e.name.as_str())).collect();
    assert_eq!(toc, vec![(1, "Overview"), (1, "Scope"), (1, "Appendix")]);
    assert!(model.revision_table_found);
    assert_eq!(model.revision_records.len(), 1);
    assert_eq!(model.revision_records[0].get("author"), Some("Jane Doe"));
    assert_eq!(model.footer_text, "Apollo | Confidential");
    assert_eq!(model.embedded.len(), 1);
    assert_eq!(model.embedded[0].relationship_id.as_deref(), Some("rId10"));
}

#[test]
fn test_conforming_document() {
    let validator = Validator::new(Default::default()).unwrap();
    let report = validator.validate(release_plan("2024-03-12", "PRJ-9"), &request()).unwrap();

    let categories: Vec<Category> = report.categories().iter().map(|c| c.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Sections,
            Category::RevisionHistory,
            Category::Page1Fields,
            Category::TableOfContents,
            Category::EmbeddedSpreadsheet,
        ]
    );
    for category in report.categories() {
        for check in &category.checks {
            assert_eq!(check.status, CheckStatus::Matched, "{}: {}", category.category, check);
        }
    }
    let sections = report.category(Category::Sections).unwrap();
    assert_eq!(sections.extras, vec!["Appendix".to_string()]);
    assert_eq!(report.status(), CheckStatus::Matched);

    let rows = report.export_rows();
    assert_eq!(rows.len(), report.check_count() + 2);
    assert!(rows.iter().any(|(section, line)| section == "Sections" && line == "Extra: Appendix"));
}

#[test]
fn test_stale_revision_and_cell_mismatch() {
    let validator = Validator::default();
    let report = validator.validate(release_plan("01/02/2024", "PRJ-10"), &request()).unwrap();

    let revision = report.category(Category::RevisionHistory).unwrap();
    assert_eq!(revision.check("Revision date").unwrap().status, CheckStatus::Mismatched);
    assert_eq!(revision.check("Author").unwrap().status, CheckStatus::Matched);

    let embedded = report.category(Category::EmbeddedSpreadsheet).unwrap();
    assert_eq!(embedded.check("Matching sheets").unwrap().status, CheckStatus::Matched);
    let cell = embedded.check("Project ID cell").unwrap();
    assert_eq!(cell.status, CheckStatus::Mismatched);
    assert_eq!(cell.found, "PRJ-10");
    assert_eq!(report.status(), CheckStatus::Mismatched);
}

#[test]
fn test_missing_structures_are_outcomes() {
    let body = paragraph(None, false, "Just a note");
    let data = docx(&body, "", &[]);
    let report = Validator::default().validate(data, &request()).unwrap();

    assert_eq!(report.categories().len(), 5);
    let revision = report.category(Category::RevisionHistory).unwrap();
    assert!(revision.checks.iter().all(|c| c.status == CheckStatus::Missing));
    let embedded = report.category(Category::EmbeddedSpreadsheet).unwrap();
    assert_eq!(embedded.status(), CheckStatus::Missing);
    let page1 = report.category(Category::Page1Fields).unwrap();
    assert_eq!(page1.check("Footer").unwrap().status, CheckStatus::Missing);
}

#[test]
fn test_corrupt_archive_aborts_run() {
    let result = Validator::default().validate(b"PK\x03\x04 truncated".to_vec(), &request());
    assert!(matches!(result, Err(Error::CorruptArchive(_))));
}

#[test]
fn test_malformed_document_part_aborts_run() {
    let data = common::zip_package(&[("word/document.xml", b"<w:document><w:body>".to_vec())]);
    let result = Validator::default().validate(data, &request());
    assert!(matches!(result, Err(Error::MalformedXml { .. })));
}

#[test]
fn test_corrupt_embedded_spreadsheet_aborts_run() {
    let data = docx(&paragraph(None, false, "x"), "", &[("Book1.xlsx", b"garbage".to_vec())]);
    let result = Validator::default().validate(data, &request());
    assert!(matches!(result, Err(Error::CorruptSpreadsheet(_))));
}

#[test]
fn test_validate_path_names_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("release-plan.docx");
    std::fs::write(&path, release_plan("2024-03-12", "PRJ-9")).unwrap();

    let request = ValidationRequest::new(ValidationConfig::from_pairs([("Sections", "Overview")]))
        .with_record(record())
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    let report = Validator::default().validate_path(&path, &request).unwrap();
    assert_eq!(report.document, "release-plan.docx");
    assert_eq!(report.status(), CheckStatus::Matched);
}

#[test]
fn test_text_box_fields_counted_once() {
    let text_box = r#"<w:p><w:r><w:t>Release Plan</w:t></w:r><w:r><w:pict><w:txbxContent>
        <w:p><w:r><w:t>Project Name: Apollo</w:t></w:r></w:p>
    </w:txbxContent></w:pict></w:r></w:p>"#;
    let body = [text_box.to_string(), paragraph(None, false, "Body")].concat();
    let model = extract(docx(&body, "", &[]), &ExtractOptions::default()).unwrap();

    let texts: Vec<String> = model.blocks.iter().map(|b| b.text()).collect();
    assert_eq!(texts, vec!["Release Plan", "Project Name: Apollo", "Body"]);
}
