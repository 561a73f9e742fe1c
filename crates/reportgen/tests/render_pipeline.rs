//! Metadata workbook + data source -> rendered document

mod common;

use std::io::Cursor;

use pretty_assertions::assert_eq;
use reportgen::prelude::*;
use reportgen::{CoreError, XlsxReader, COLUMNS_SHEET};

use common::{employee_survey_metadata, write_workbook, SURVEY_CSV};

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new(target: &str, heading: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("survey.csv"), SURVEY_CSV).unwrap();
        employee_survey_metadata(
            &dir.path().join("Formatter Metadata.xlsx"),
            "survey.csv",
            target,
            heading,
        );
        Self { dir }
    }

    fn options(&self) -> RenderOptions {
        RenderOptions {
            metadata_path: self.dir.path().join("Formatter Metadata.xlsx"),
            output_dir: self.dir.path().to_path_buf(),
            ..Default::default()
        }
    }
}

fn text(value: &str) -> RawValue {
    RawValue::text(value)
}

#[test]
fn test_employee_survey_xlsx() {
    let fixture = Fixture::new("XLSX", "GROUP");
    let report = render_report("Employee Survey", &fixture.options()).unwrap();

    assert_eq!(report.path, fixture.dir.path().join("Employee_Survey.xlsx"));
    assert_eq!(report.target, OutputTarget::Xlsx);
    assert_eq!(report.row_count, 3);

    let bytes = std::fs::read(&report.path).unwrap();
    let tables = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let sheet = tables.sheet(0).unwrap();
    assert_eq!(sheet.name, "Employee Survey");
    assert_eq!(
        sheet.rows,
        vec![
            vec![text("Employee Survey 2024")],
            vec![
                text("Record"),
                text("Title"),
                text("Sex"),
                text("Supervisor"),
                text("Eval Number")
            ],
            vec![text("Manager")],
            vec![
                RawValue::Number(1.0),
                text("Director"),
                text("F"),
                text("Board"),
                RawValue::Number(7.0)
            ],
            vec![
                RawValue::Number(3.0),
                text("Lead"),
                text("M"),
                text("Director"),
                RawValue::Number(5.0)
            ],
            vec![text("Staff")],
            vec![
                RawValue::Number(2.0),
                text("Clerk"),
                text("M"),
                text("Lee, Ann"),
                RawValue::Number(3.0)
            ],
        ]
    );
}

#[test]
fn test_target_override_and_page_heading_pdf() {
    let fixture = Fixture::new("XLSX", "PAGE");
    let options = RenderOptions {
        target_override: Some(OutputTarget::Pdf),
        ..fixture.options()
    };

    let report = render_report("Employee Survey", &options).unwrap();
    assert_eq!(report.path, fixture.dir.path().join("Employee_Survey.pdf"));
    let bytes = std::fs::read(&report.path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_declared_html_target() {
    let fixture = Fixture::new("HTML", "GROUP");
    let report = render_report("Employee Survey", &fixture.options()).unwrap();

    let html = std::fs::read_to_string(&report.path).unwrap();
    let manager = html.find(">Manager</td>").unwrap();
    let staff = html.find(">Staff</td>").unwrap();
    assert!(manager < staff);
    assert!(html.contains(">Lee, Ann</td>"));
}

#[test]
fn test_xlsx_data_source() {
    let fixture = Fixture::new("XLSX", "NONE");
    let source = fixture.dir.path().join("survey.xlsx");
    write_workbook(
        &source,
        &[(
            "Export",
            vec![
                vec!["Record", "Title", "Classification", "Sex", "Supervisor", "Eval Number"],
                vec!["9", "Analyst\nII", "Staff", "F", "Kim", "4"],
                vec![],
            ],
        )],
    );
    let options = RenderOptions {
        source_override: Some(source),
        ..fixture.options()
    };

    let report = render_report("Employee Survey", &options).unwrap();
    assert_eq!(report.row_count, 1);
    let table = XlsxReader::read_first_sheet(&report.path).unwrap();
    // title, header, one data row; no captions with heading NONE
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows[2][1], text("Analyst II"));
}

#[test]
fn test_unknown_report() {
    let fixture = Fixture::new("XLSX", "GROUP");
    let err = render_report("Payroll", &fixture.options()).unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::MetadataNotFound(name)) if name == "Payroll"));
}

#[test]
fn test_unreadable_source() {
    let fixture = Fixture::new("XLSX", "GROUP");
    std::fs::remove_file(fixture.dir.path().join("survey.csv")).unwrap();

    let err = render_report("Employee Survey", &fixture.options()).unwrap_err();
    assert!(matches!(err, Error::Source { .. }));
    assert!(!fixture.dir.path().join("Employee_Survey.xlsx").exists());
}

#[test]
fn test_missing_metadata_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let options = RenderOptions {
        metadata_path: dir.path().join("absent.xlsx"),
        output_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let err = render_report("Employee Survey", &options).unwrap_err();
    assert!(matches!(err, Error::Metadata { .. }));
}

#[test]
fn test_workbook_metadata_sheets() {
    let fixture = Fixture::new("XLSX", "GROUP");
    let metadata = WorkbookMetadata::open(fixture.options().metadata_path).unwrap();
    let columns = metadata.load_column_specs("Employee Survey").unwrap();

    assert_eq!(COLUMNS_SHEET, "Columns");
    assert_eq!(columns.len(), 6);
    assert_eq!(columns[0].column_width, Some(8.0));
    assert_eq!(metadata.base_dir(), Some(fixture.dir.path()));
}
