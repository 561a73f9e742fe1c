//! XLSX table reader
//!
//! Reads worksheet cell values as plain tables. Styles are only consulted
//! to recognize date cells; formulas and other workbook features are
//! ignored and a formula cell yields its cached value.

mod dates;
mod table;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use ahash::AHashMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::address::parse_cell_ref;
use crate::error::{XlsxError, XlsxResult};
use dates::{serial_to_text, DateKind, DateStyles};
use reportgen_core::RawValue;

pub use table::{SheetTable, WorkbookTables};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        let mut hex_chars = String::new();
        let mut decoded = None;
        let mut saw_x = false;

        if chars.peek() == Some(&'x') {
            chars.next();
            saw_x = true;

            while hex_chars.len() < 4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                chars.next();
                decoded = u32::from_str_radix(&hex_chars, 16)
                    .ok()
                    .and_then(char::from_u32);
                if decoded.is_none() {
                    hex_chars.push('_');
                }
            }
        }

        match decoded {
            Some(ch) => result.push(ch),
            None => {
                result.push('_');
                if saw_x {
                    result.push('x');
                }
                result.push_str(&hex_chars);
            }
        }
    }

    result
}

/// XLSX table reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read every worksheet of a file
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<WorkbookTables> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read every worksheet from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<WorkbookTables> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let date_styles = DateStyles::read(&mut archive)?;
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut sheets = Vec::with_capacity(sheet_info.len());
        for (name, r_id) in sheet_info {
            match sheet_paths.get(&r_id) {
                Some(path) => {
                    let mut table = SheetTable::new(name);
                    let context = CellContext {
                        shared_strings: &shared_strings,
                        date_styles: &date_styles,
                    };
                    Self::read_worksheet(&mut archive, path, &mut table, &context)?;
                    sheets.push(table);
                }
                None => log::warn!("Worksheet '{}' has no relationship {}", name, r_id),
            }
        }

        log::debug!("Read {} worksheets", sheets.len());
        Ok(WorkbookTables::new(sheets))
    }

    /// Read the first worksheet only
    pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> XlsxResult<SheetTable> {
        let path = path.as_ref();
        Self::read_file(path)?
            .into_sheets()
            .into_iter()
            .next()
            .ok_or_else(|| XlsxError::SheetNotFound(format!("{} has no worksheets", path.display())))
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let reader = BufReader::new(file);
        // Whitespace at run boundaries is part of the string
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs repeat the text in another script
        let mut in_rph = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_rph = true,
                    b"t" if in_si && !in_rph => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_rph = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let name = attr_value(&e, b"name");
                    let r_id = attr_value(&e, b"r:id");
                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<AHashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = AHashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read the cell values of one worksheet into `table`
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        table: &mut SheetTable,
        context: &CellContext<'_>,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();

        let mut current_row: Option<usize> = None;
        let mut next_col: usize = 0;
        let mut cell_col: usize = 0;
        let mut cell_type: Option<String> = None;
        let mut cell_style: Option<usize> = None;
        let mut value = String::new();
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        table.rows.push(Vec::new());
                        current_row = Some(table.rows.len() - 1);
                        next_col = 0;
                    }
                    b"c" if current_row.is_some() => {
                        in_cell = true;
                        value.clear();
                        cell_type = attr_value(&e, b"t");
                        cell_style = attr_value(&e, b"s").and_then(|s| s.parse().ok());
                        cell_col = match attr_value(&e, b"r") {
                            Some(r) => parse_cell_ref(&r)?.1 as usize,
                            None => next_col,
                        };
                        next_col = cell_col + 1;
                    }
                    b"v" if in_cell => in_value = true,
                    b"is" if in_cell => in_inline_str = true,
                    b"t" if in_inline_str => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"c" => {
                    // Style-only cell: it still occupies its column
                    if let Some(r) = attr_value(&e, b"r") {
                        next_col = parse_cell_ref(&r)?.1 as usize + 1;
                    } else {
                        next_col += 1;
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" if in_cell => {
                        in_cell = false;
                        if let Some(row) = current_row {
                            let raw = cell_value(
                                cell_type.as_deref(),
                                &value,
                                context.shared_strings,
                                context.date_styles.kind(cell_style),
                            )?;
                            if !raw.is_empty() {
                                table.set(row, cell_col, raw);
                            }
                        }
                    }
                    b"row" => current_row = None,
                    b"v" => in_value = false,
                    b"is" => in_inline_str = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    if let Ok(text) = e.unescape() {
                        value.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }
}

/// Workbook-level lookups shared by every worksheet
struct CellContext<'a> {
    shared_strings: &'a [String],
    date_styles: &'a DateStyles,
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.to_string()))
}

/// Typed value of a cell from its `t` attribute, raw text and the date kind
/// of its style. Dated numbers become their display text.
fn cell_value(
    cell_type: Option<&str>,
    value: &str,
    shared_strings: &[String],
    date_kind: Option<DateKind>,
) -> XlsxResult<RawValue> {
    if value.is_empty() {
        return Ok(RawValue::Empty);
    }

    let raw = match cell_type {
        Some("s") => {
            let idx: usize = value.trim().parse().map_err(|_| {
                XlsxError::Parse(format!("Invalid shared string index: {}", value))
            })?;
            let s = shared_strings.get(idx).ok_or_else(|| {
                XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
            })?;
            RawValue::text(s.clone())
        }
        Some("inlineStr") | Some("str") => RawValue::text(decode_excel_escapes(value)),
        Some("b") => RawValue::text(if value == "1" || value.eq_ignore_ascii_case("true") {
            "TRUE"
        } else {
            "FALSE"
        }),
        None | Some("n") => match value.trim().parse::<f64>() {
            Ok(n) => match date_kind.and_then(|kind| serial_to_text(n, kind)) {
                Some(text) => RawValue::text(text),
                None => RawValue::Number(n),
            },
            Err(_) => RawValue::text(value),
        },
        Some(_) => RawValue::text(value),
    };
    Ok(raw)
}
