//! Date and time cells
//!
//! Worksheets store dates as serial day numbers; only the cell's number
//! format says how to read them. `styles.xml` maps each cell style index to
//! a number format, which is classified here.

use std::io::{BufReader, Read, Seek};

use ahash::AHashMap;
use chrono::{Duration, NaiveDate, NaiveTime};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::attr_value;
use crate::error::{XlsxError, XlsxResult};

/// How a numeric cell is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateKind {
    Date,
    Time,
    DateTime,
}

impl DateKind {
    /// Built-in number format ids with date or time meaning
    fn from_builtin(id: u32) -> Option<Self> {
        match id {
            14..=17 => Some(DateKind::Date),
            18..=21 | 45..=47 => Some(DateKind::Time),
            22 => Some(DateKind::DateTime),
            _ => None,
        }
    }

    /// Classify a custom format code by its date and time placeholders.
    /// Quoted literals, escaped characters and bracketed sections (colors,
    /// locales, elapsed time) are ignored.
    fn from_code(code: &str) -> Option<Self> {
        let mut plain = String::with_capacity(code.len());
        let mut chars = code.chars();
        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    for q in chars.by_ref() {
                        if q == '"' {
                            break;
                        }
                    }
                }
                '[' => {
                    for q in chars.by_ref() {
                        if q == ']' {
                            break;
                        }
                    }
                }
                '\\' | '_' | '*' => {
                    chars.next();
                }
                _ => plain.push(c.to_ascii_lowercase()),
            }
        }

        if plain.contains("general") {
            return None;
        }
        let time = plain.contains('h') || plain.contains('s');
        let date = plain.contains('y') || plain.contains('d') || (plain.contains('m') && !time);
        match (date, time) {
            (true, true) => Some(DateKind::DateTime),
            (true, false) => Some(DateKind::Date),
            (false, true) => Some(DateKind::Time),
            (false, false) => None,
        }
    }
}

/// Date kind per cell style index (`s` attribute)
#[derive(Debug, Default)]
pub(crate) struct DateStyles {
    kinds: Vec<Option<DateKind>>,
}

impl DateStyles {
    /// Read `xl/styles.xml`; a workbook without one has no date styles
    pub(crate) fn read<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Self> {
        let file = match archive.by_name("xl/styles.xml") {
            Ok(f) => f,
            Err(_) => return Ok(Self::default()),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut custom: AHashMap<u32, DateKind> = AHashMap::new();
        let mut xf_formats: Vec<u32> = Vec::new();
        let mut in_cell_xfs = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"numFmt" => {
                        let id = attr_value(&e, b"numFmtId").and_then(|v| v.parse().ok());
                        let code = attr_value(&e, b"formatCode");
                        if let (Some(id), Some(code)) = (id, code) {
                            if let Some(kind) = DateKind::from_code(&code) {
                                custom.insert(id, kind);
                            }
                        }
                    }
                    b"cellXfs" => in_cell_xfs = true,
                    b"xf" if in_cell_xfs => {
                        let id = attr_value(&e, b"numFmtId")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                        xf_formats.push(id);
                    }
                    _ => {}
                },
                Ok(Event::End(e)) if e.name().as_ref() == b"cellXfs" => in_cell_xfs = false,
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        let kinds = xf_formats
            .into_iter()
            .map(|id| custom.get(&id).copied().or_else(|| DateKind::from_builtin(id)))
            .collect();
        Ok(Self { kinds })
    }

    /// Date kind of a cell style index, if it displays a date or time
    pub(crate) fn kind(&self, style: Option<usize>) -> Option<DateKind> {
        style.and_then(|s| self.kinds.get(s).copied().flatten())
    }
}

/// Display text for a serial date in the 1900 date system.
///
/// Returns `None` for serials outside the calendar so the number is kept.
pub(crate) fn serial_to_text(serial: f64, kind: DateKind) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let mut days = serial.trunc() as i64;
    let mut seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;
    if seconds >= 86_400 {
        days += 1;
        seconds -= 86_400;
    }
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, 0)?;
    let time_text = time.format("%H:%M:%S").to_string();

    if kind == DateKind::Time {
        return Some(time_text);
    }

    // Serial 60 is the fictional 1900-02-29
    let date_text = if days == 60 {
        "1900-02-29".to_string()
    } else {
        let base = NaiveDate::from_ymd_opt(1899, 12, 31)?;
        let adjusted = if days > 60 { days - 1 } else { days };
        base.checked_add_signed(Duration::days(adjusted))?
            .format("%Y-%m-%d")
            .to_string()
    };

    match kind {
        DateKind::DateTime => Some(format!("{} {}", date_text, time_text)),
        _ => Some(date_text),
    }
}
