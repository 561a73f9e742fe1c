//! Layout and rendering tests for PDF reports

use pretty_assertions::assert_eq;
use reportgen_core::{
    build_plan, Color, ColumnSpec, DataRow, HeadingType, PageOrientation, RawValue, ReportSpec,
};
use reportgen_pdf::{DocumentLayout, PageGeometry, PdfWriter};

fn sales_spec() -> ReportSpec {
    let mut spec = ReportSpec::new("Sales by Region")
        .with_column(ColumnSpec::header("Region"))
        .with_column(ColumnSpec::new("Rep"))
        .with_column(ColumnSpec::new("Amount").with_number_format("$#,###"));
    spec.title = "Quarterly Sales".into();
    spec.header_background_color = Some(Color::rgb(0x1F, 0x4E, 0x78));
    spec
}

fn row(region: &str, rep: &str, amount: f64) -> DataRow {
    DataRow::from_pairs([
        ("Region", RawValue::text(region)),
        ("Rep", RawValue::text(rep)),
        ("Amount", RawValue::Number(amount)),
    ])
}

fn layout(spec: &ReportSpec, rows: &[DataRow]) -> DocumentLayout {
    let plan = build_plan(spec, rows).unwrap();
    DocumentLayout::build(&plan, PageGeometry::a4(spec.page_orientation)).unwrap()
}

#[test]
fn test_group_report_fits_one_page() {
    let spec = sales_spec();
    let doc = layout(&spec, &[row("West", "Ann", 1200.0), row("East", "Bob", 800.0)]);

    assert_eq!(doc.page_count(), 1);
    let texts: Vec<String> = doc.pages[0].blocks.iter().map(|b| b.text()).collect();
    assert_eq!(
        texts,
        vec!["Quarterly Sales", "Rep", "Amount", "East", "Bob", "$800", "West", "Ann", "$1,200"]
    );
}

#[test]
fn test_header_cells_are_filled_and_bordered() {
    let spec = sales_spec();
    let doc = layout(&spec, &[row("West", "Ann", 1.0)]);
    let header = &doc.pages[0].blocks[1];

    assert_eq!(header.fill, Some(Color::rgb(0x1F, 0x4E, 0x78)));
    assert_eq!(header.stroke, Some(Color::BLACK));
    // title has no border
    assert_eq!(doc.pages[0].blocks[0].stroke, None);
}

#[test]
fn test_page_heading_starts_new_pages() {
    let mut spec = sales_spec();
    spec.heading_type = HeadingType::Page;
    let doc = layout(
        &spec,
        &[row("West", "Ann", 1.0), row("East", "Bob", 2.0), row("North", "Cy", 3.0)],
    );

    assert_eq!(doc.page_count(), 3);
    // every page after the first opens with the caption, then the header row
    for page in &doc.pages[1..] {
        assert_eq!(page.blocks[1].text(), "Rep");
        assert_eq!(page.blocks[0].y, 72.0);
    }
}

#[test]
fn test_overflow_continues_on_next_page() {
    let spec = ReportSpec::new("Long")
        .with_column(ColumnSpec::new("Rep"))
        .with_column(ColumnSpec::new("Amount"));
    let rows: Vec<DataRow> = (0..100)
        .map(|i| {
            DataRow::from_pairs([
                ("Rep", RawValue::text(format!("Rep {}", i))),
                ("Amount", RawValue::Number(i as f64)),
            ])
        })
        .collect();
    let doc = layout(&spec, &rows);
    let bottom = doc.geometry.bottom();

    assert!(doc.page_count() >= 3);
    for page in &doc.pages {
        for block in &page.blocks {
            assert!(block.y + block.height <= bottom + 1e-9);
        }
    }
}

#[test]
fn test_landscape_is_wider() {
    let mut spec = sales_spec();
    spec.page_orientation = PageOrientation::Landscape;
    let doc = layout(&spec, &[row("West", "Ann", 1.0)]);
    assert!(doc.geometry.width > doc.geometry.height);
}

#[test]
fn test_write_produces_pdf() {
    let spec = sales_spec();
    let plan = build_plan(&spec, &[row("West", "Ann", 1200.0)]).unwrap();

    let mut buf = Vec::new();
    PdfWriter::write(&plan, &spec, &mut buf).unwrap();
    assert!(buf.starts_with(b"%PDF"));
}

#[test]
fn test_write_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Sales_by_Region.pdf");
    let spec = sales_spec();
    let plan = build_plan(&spec, &[]).unwrap();

    PdfWriter::write_file(&plan, &spec, &path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}
