//! Fixtures shared by the integration tests

use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn column_letter(col: usize) -> char {
    (b'A' + col as u8) as char
}

fn sheet_xml(rows: &[Vec<&str>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!("<row r=\"{}\">", r + 1));
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            xml.push_str(&format!(
                "<c r=\"{}{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                column_letter(c),
                r + 1,
                escape(value)
            ));
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Write a workbook of inline-string sheets (at most 26 columns each)
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let mut overrides = String::new();
    let mut sheet_entries = String::new();
    let mut rels = String::new();
    for (i, (name, _)) in sheets.iter().enumerate() {
        let n = i + 1;
        overrides.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{n}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>"
        ));
        sheet_entries.push_str(&format!(
            "<sheet name=\"{}\" sheetId=\"{n}\" r:id=\"rId{n}\"/>",
            escape(name)
        ));
        rels.push_str(&format!(
            "<Relationship Id=\"rId{n}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{n}.xml\"/>"
        ));
    }

    zip.start_file("[Content_Types].xml", options).unwrap();
    write!(
        zip,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\"><Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/><Default Extension=\"xml\" ContentType=\"application/xml\"/><Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>{overrides}</Types>"
    )
    .unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    write!(
        zip,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\"><Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/></Relationships>"
    )
    .unwrap();

    zip.start_file("xl/workbook.xml", options).unwrap();
    write!(
        zip,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\"><sheets>{sheet_entries}</sheets></workbook>"
    )
    .unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    write!(
        zip,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{rels}</Relationships>"
    )
    .unwrap();

    for (i, (_, rows)) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
            .unwrap();
        zip.write_all(sheet_xml(rows).as_bytes()).unwrap();
    }

    zip.finish().unwrap();
}

/// Metadata for the "Employee Survey" report reading `source`
pub fn employee_survey_metadata(path: &Path, source: &str, target: &str, heading: &str) {
    write_workbook(
        path,
        &[
            (
                "Columns",
                vec![
                    vec!["Report Name", "Field Name", "Is Header", "Number Format", "Column Width"],
                    vec!["Employee Survey", "Record", "N", "0", "8"],
                    vec!["Employee Survey", "Title", "N", "", "20"],
                    vec!["Employee Survey", "Classification", "Y", "", ""],
                    vec!["Employee Survey", "Sex", "N", "", ""],
                    vec!["Employee Survey", "Supervisor", "N", "", "18"],
                    vec!["Employee Survey", "Eval Number", "N", "0", ""],
                    vec!["Other Report", "Name", "N", "", ""],
                ],
            ),
            (
                "Reports",
                vec![
                    vec![
                        "Report Name",
                        "CSV File",
                        "Title",
                        "Header Background Color",
                        "Border Color",
                        "Output Target",
                        "Heading Type",
                    ],
                    vec![
                        "Employee Survey",
                        source,
                        "Employee Survey 2024",
                        "#1F4E78",
                        "#000000",
                        target,
                        heading,
                    ],
                ],
            ),
        ],
    );
}

pub const SURVEY_CSV: &str = "\u{feff}Record,Title,Classification,Sex,Supervisor,Eval Number\r\n\
1,Director,Manager,F,Board,7\r\n\
2,Clerk,Staff,M,\"Lee,\nAnn\",3\r\n\
, , , , , \r\n\
3,Lead,Manager,M,Director,5\r\n";
