//! End-to-end tests for XLSX reports (plan -> write -> read back -> verify)

use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;
use reportgen_core::{
    build_plan, Color, ColumnSpec, DataRow, HeadingType, PageOrientation, RawValue, ReportSpec,
};
use reportgen_xlsx::{XlsxReader, XlsxWriter};

fn sales_spec() -> ReportSpec {
    let mut spec = ReportSpec::new("Sales by Region")
        .with_column(ColumnSpec::header("Region"))
        .with_column(ColumnSpec::new("Rep").with_width(18.0))
        .with_column(ColumnSpec::new("Amount").with_number_format("$#,###"))
        .with_column(ColumnSpec::new("Share").with_number_format("0%"));
    spec.title = "Quarterly Sales".into();
    spec.header_background_color = Some(Color::rgb(0x1F, 0x4E, 0x78));
    spec.header_font_color = Some(Color::WHITE);
    spec.border_color = Some(Color::BLACK);
    spec
}

fn sales_rows() -> Vec<DataRow> {
    vec![
        DataRow::from_pairs([
            ("Region", RawValue::text("West")),
            ("Rep", RawValue::text("Ann & Co")),
            ("Amount", RawValue::text("1,200.40")),
            ("Share", RawValue::Number(0.25)),
        ]),
        DataRow::from_pairs([
            ("Region", RawValue::text("East")),
            ("Rep", RawValue::text("Bob")),
            ("Amount", RawValue::Number(-800.0)),
            ("Share", RawValue::Number(0.5)),
        ]),
    ]
}

fn write(spec: &ReportSpec, rows: &[DataRow]) -> Vec<u8> {
    let plan = build_plan(spec, rows).unwrap();
    let mut buf = Vec::new();
    XlsxWriter::write(&plan, spec, Cursor::new(&mut buf)).unwrap();
    buf
}

fn part(buf: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(buf)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_report_values_roundtrip() {
    let spec = sales_spec();
    let buf = write(&spec, &sales_rows());

    let tables = XlsxReader::read(Cursor::new(&buf)).unwrap();
    assert_eq!(tables.sheet_count(), 1);
    let sheet = tables.sheet(0).unwrap();
    assert_eq!(sheet.name, "Sales by Region");

    assert_eq!(
        sheet.rows,
        vec![
            vec![RawValue::text("Quarterly Sales")],
            vec![
                RawValue::text("Rep"),
                RawValue::text("Amount"),
                RawValue::text("Share")
            ],
            vec![RawValue::text("East")],
            vec![
                RawValue::text("Bob"),
                RawValue::Number(-800.0),
                RawValue::Number(50.0)
            ],
            vec![RawValue::text("West")],
            vec![
                RawValue::text("Ann & Co"),
                RawValue::Number(1200.0),
                RawValue::Number(25.0)
            ],
        ]
    );
}

#[test]
fn test_banners_are_merged() {
    let buf = write(&sales_spec(), &sales_rows());
    let sheet = part(&buf, "xl/worksheets/sheet1.xml");

    assert!(sheet.contains("<mergeCells count=\"3\">"));
    assert!(sheet.contains("<mergeCell ref=\"A1:C1\"/>"));
    assert!(sheet.contains("<mergeCell ref=\"A3:C3\"/>"));
    assert!(sheet.contains("<mergeCell ref=\"A5:C5\"/>"));
    assert!(sheet.contains("<col min=\"1\" max=\"1\" width=\"18\" customWidth=\"1\"/>"));
}

#[test]
fn test_page_setup() {
    let mut spec = sales_spec();
    spec.page_orientation = PageOrientation::Landscape;
    spec.print_pages_width = 2;
    let buf = write(&spec, &sales_rows());
    let sheet = part(&buf, "xl/worksheets/sheet1.xml");

    assert!(sheet.contains("<pageSetUpPr fitToPage=\"1\"/>"));
    assert!(sheet.contains(
        "<pageSetup orientation=\"landscape\" fitToWidth=\"2\" fitToHeight=\"0\"/>"
    ));
    assert!(!sheet.contains("<rowBreaks"));
}

#[test]
fn test_page_heading_row_breaks() {
    let mut spec = sales_spec();
    spec.heading_type = HeadingType::Page;
    let buf = write(&spec, &sales_rows());
    let sheet = part(&buf, "xl/worksheets/sheet1.xml");

    // Title, East caption, header, Bob | West caption, header, Ann
    assert!(sheet.contains("<rowBreaks count=\"1\" manualBreakCount=\"1\">"));
    assert!(sheet.contains("<brk id=\"4\" max=\"16383\" man=\"1\"/>"));

    let tables = XlsxReader::read(Cursor::new(&buf)).unwrap();
    let rows = &tables.sheet(0).unwrap().rows;
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[5][0], RawValue::text("Rep"));
}

#[test]
fn test_percent_uses_literal_format() {
    let buf = write(&sales_spec(), &sales_rows());
    let styles = part(&buf, "xl/styles.xml");

    assert!(styles.contains("formatCode=\"$#,###\""));
    assert!(styles.contains("formatCode=\"0&quot;%&quot;\""));
    assert!(styles.contains("<fgColor rgb=\"FF1F4E78\"/>"));
    assert!(styles.contains("<left style=\"thin\"><color rgb=\"FF000000\"/></left>"));
}

#[test]
fn test_empty_report_has_title_and_header() {
    let buf = write(&sales_spec(), &[]);
    let tables = XlsxReader::read(Cursor::new(&buf)).unwrap();
    assert_eq!(tables.sheet(0).unwrap().len(), 2);
}

#[test]
fn test_write_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.xlsx");
    let spec = sales_spec();
    let plan = build_plan(&spec, &sales_rows()).unwrap();

    XlsxWriter::write_file(&plan, &spec, &path).unwrap();
    let table = XlsxReader::read_first_sheet(&path).unwrap();
    assert_eq!(table.header(), vec!["Quarterly Sales"]);
}
