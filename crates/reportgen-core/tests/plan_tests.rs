//! End-to-end tests: metadata records to render plans

use pretty_assertions::assert_eq;
use reportgen_core::{
    build_plan, CellValue, ColumnSpec, DataRow, Error, FieldClassifier, GroupingEngine,
    HeadingType, MetadataRecord, NodeKind, PlanNode, ReportSpec,
};

const COLUMN_HEADERS: [&str; 4] = ["Report Name", "Field Name", "Is Header", "Number Format"];

fn column_record(field: &str, header: bool, format: &str) -> MetadataRecord {
    MetadataRecord::new(
        &COLUMN_HEADERS,
        vec![
            "Employee Survey".to_string(),
            field.to_string(),
            if header { "Y" } else { "" }.to_string(),
            format.to_string(),
        ],
    )
}

fn employee_survey() -> ReportSpec {
    let columns = [
        column_record("Record", false, "0"),
        column_record("Title", false, ""),
        column_record("Classification", true, ""),
        column_record("Sex", false, ""),
        column_record("Supervisor", false, ""),
        column_record("Eval Number", false, "0"),
    ]
    .iter()
    .map(ColumnSpec::from_record)
    .collect::<Result<Vec<_>, _>>()
    .unwrap();

    let report = MetadataRecord::new(
        &["Report Name", "CSV File", "Title", "Heading Type"],
        vec![
            "Employee Survey".to_string(),
            "survey.csv".to_string(),
            "Employee Survey 2024".to_string(),
            "GROUP".to_string(),
        ],
    );
    ReportSpec::from_record(&report, columns)
}

fn survey_rows() -> Vec<DataRow> {
    vec![
        DataRow::from_pairs([
            ("Record", "1"),
            ("Title", "Director"),
            ("Classification", "Manager"),
            ("Sex", "F"),
            ("Supervisor", "Board"),
            ("Eval Number", "7"),
        ]),
        DataRow::from_pairs([
            ("Record", "2"),
            ("Title", "Clerk"),
            ("Classification", "Staff"),
            ("Sex", "M"),
            ("Supervisor", "Lee"),
            ("Eval Number", "3"),
        ]),
        DataRow::from_pairs([
            ("Record", "3"),
            ("Title", "Lead"),
            ("Classification", "Manager"),
            ("Sex", "M"),
            ("Supervisor", "Director"),
            ("Eval Number", "5"),
        ]),
    ]
}

fn displays(node: &PlanNode) -> Vec<String> {
    node.cells()
        .unwrap()
        .iter()
        .map(|c| c.display.clone())
        .collect()
}

#[test]
fn test_employee_survey_groups() {
    let spec = employee_survey();
    let rows = survey_rows();

    let fields = FieldClassifier::classify(&spec);
    assert_eq!(fields.header_fields(), vec!["Classification"]);
    assert_eq!(
        fields.data_fields(),
        vec!["Record", "Title", "Sex", "Supervisor", "Eval Number"]
    );

    let groups = GroupingEngine::group(&rows, fields.header_columns());
    let captions: Vec<Option<&str>> = groups.iter().map(|g| g.caption()).collect();
    assert_eq!(captions, vec![Some("Manager"), Some("Staff")]);
    assert_eq!(groups[0].rows(), &[&rows[0], &rows[2]]);
    assert_eq!(groups[1].rows(), &[&rows[1]]);
    assert_eq!(groups[0].rows()[1].get("Supervisor").as_text(), "Director");
}

#[test]
fn test_employee_survey_plan() {
    let spec = employee_survey();
    let plan = build_plan(&spec, &survey_rows()).unwrap();

    assert_eq!(
        plan.kinds(),
        vec![
            NodeKind::Title,
            NodeKind::HeaderRow,
            NodeKind::GroupCaption,
            NodeKind::DataRow,
            NodeKind::DataRow,
            NodeKind::GroupCaption,
            NodeKind::DataRow,
        ]
    );

    match &plan.nodes()[0] {
        PlanNode::Title(banner) => assert_eq!(banner.text, "Employee Survey 2024"),
        other => panic!("expected title, got {other:?}"),
    }
    assert_eq!(
        displays(&plan.nodes()[1]),
        vec!["Record", "Title", "Sex", "Supervisor", "Eval Number"]
    );
    match &plan.nodes()[2] {
        PlanNode::GroupCaption(banner) => assert_eq!(banner.text, "Manager"),
        other => panic!("expected caption, got {other:?}"),
    }
    assert_eq!(
        displays(&plan.nodes()[4]),
        vec!["3", "Lead", "M", "Director", "5"]
    );
    assert_eq!(
        plan.nodes()[4].cells().unwrap()[0].value,
        CellValue::Number(3.0)
    );
}

#[test]
fn test_page_mode_breaks_between_groups() {
    let mut spec = employee_survey();
    spec.heading_type = HeadingType::Page;
    spec.heading_totals = true;
    let plan = build_plan(&spec, &survey_rows()).unwrap();

    assert_eq!(
        plan.kinds(),
        vec![
            NodeKind::Title,
            NodeKind::GroupCaption,
            NodeKind::HeaderRow,
            NodeKind::DataRow,
            NodeKind::DataRow,
            NodeKind::TotalsRow,
            NodeKind::PageBreak,
            NodeKind::GroupCaption,
            NodeKind::HeaderRow,
            NodeKind::DataRow,
            NodeKind::TotalsRow,
        ]
    );

    // Record and Eval Number carry numeric formats
    assert_eq!(
        displays(&plan.nodes()[5]),
        vec!["Totals", "", "", "", "12"]
    );
    assert_eq!(
        displays(&plan.nodes()[10]),
        vec!["Totals", "", "", "", "3"]
    );
}

#[test]
fn test_empty_title_starts_with_header() {
    let mut spec = employee_survey();
    spec.title = "   ".into();
    let plan = build_plan(&spec, &survey_rows()).unwrap();
    assert_eq!(plan.kinds()[0], NodeKind::HeaderRow);
    assert_eq!(plan.count(NodeKind::Title), 0);
}

#[test]
fn test_empty_dataset() {
    let spec = employee_survey();
    let plan = build_plan(&spec, &[]).unwrap();
    assert_eq!(plan.kinds(), vec![NodeKind::Title, NodeKind::HeaderRow]);
    assert_eq!(plan.column_count(), 5);
}

#[test]
fn test_report_without_data_fields_is_rejected() {
    let spec = ReportSpec::new("Only Headers").with_column(ColumnSpec::header("Region"));
    let err = build_plan(&spec, &[]).unwrap_err();
    assert!(matches!(err, Error::NoDataFields(name) if name == "Only Headers"));
}

#[test]
fn test_duplicate_field_is_rejected() {
    let spec = ReportSpec::new("Dup")
        .with_column(ColumnSpec::new("A"))
        .with_column(ColumnSpec::new("A"));
    let err = build_plan(&spec, &[]).unwrap_err();
    assert!(matches!(err, Error::DuplicateField { field, .. } if field == "A"));
}
