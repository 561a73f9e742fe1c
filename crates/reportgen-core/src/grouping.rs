//! Grouping engine: partitions data rows into captioned groups keyed by the
//! header fields' values

use std::cmp::Ordering;

use ahash::AHashMap;

use crate::format::format_value;
use crate::metadata::ColumnSpec;
use crate::value::DataRow;

/// Separator between the header field parts of a caption
pub const CAPTION_SEPARATOR: &str = " - ";

/// A run of rows sharing identical header field values
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    caption: Option<String>,
    rows: Vec<&'a DataRow>,
}

impl<'a> Group<'a> {
    /// Caption text; `None` when the report declares no header fields.
    ///
    /// `Some("")` means every header value of the group is blank.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Caption text when there is something worth printing
    pub fn visible_caption(&self) -> Option<&str> {
        self.caption().filter(|c| !c.trim().is_empty())
    }

    /// Rows of the group in input order
    pub fn rows(&self) -> &[&'a DataRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the group has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Groups rows by header field values
pub struct GroupingEngine;

impl GroupingEngine {
    /// Partition `rows` by the values of `header_columns`.
    ///
    /// - rows with identical header values (missing and empty are the same)
    ///   share a group, keeping input order;
    /// - groups are sorted by caption, case-insensitively, with ties kept in
    ///   first-seen order;
    /// - without header fields there is a single group with no caption;
    /// - zero rows yield zero groups.
    pub fn group<'a>(rows: &'a [DataRow], header_columns: &[&ColumnSpec]) -> Vec<Group<'a>> {
        if rows.is_empty() {
            return Vec::new();
        }

        if header_columns.is_empty() {
            return vec![Group {
                caption: None,
                rows: rows.iter().collect(),
            }];
        }

        let mut buckets: Vec<Vec<&'a DataRow>> = Vec::new();
        let mut positions: AHashMap<Vec<String>, usize> = AHashMap::new();

        for row in rows {
            let key: Vec<String> = header_columns
                .iter()
                .map(|c| row.get(&c.field_name).as_text().into_owned())
                .collect();

            match positions.get(&key) {
                Some(&pos) => buckets[pos].push(row),
                None => {
                    positions.insert(key, buckets.len());
                    buckets.push(vec![row]);
                }
            }
        }

        let mut groups: Vec<Group<'a>> = buckets
            .into_iter()
            .map(|rows| Group {
                caption: Some(Self::caption_for(rows[0], header_columns)),
                rows,
            })
            .collect();

        // `sort_by` is stable, so case-insensitive ties keep first-seen order.
        groups.sort_by(|a, b| {
            compare_captions(
                a.caption.as_deref().unwrap_or_default(),
                b.caption.as_deref().unwrap_or_default(),
            )
        });

        log::debug!("Grouped {} rows into {} groups", rows.len(), groups.len());
        groups
    }

    /// Caption of a group: each header field's formatted display value from
    /// its first row, joined with [`CAPTION_SEPARATOR`]. Empty when every
    /// part is blank.
    pub fn caption_for(row: &DataRow, header_columns: &[&ColumnSpec]) -> String {
        let parts: Vec<String> = header_columns
            .iter()
            .map(|c| format_value(row.get(&c.field_name), c.number_format()).display)
            .collect();

        if parts.iter().all(|p| p.trim().is_empty()) {
            String::new()
        } else {
            parts.join(CAPTION_SEPARATOR)
        }
    }
}

/// Case-insensitive, accent-insensitive comparison approximating the en
/// collation: whitespace sorts before punctuation, punctuation before
/// digits, digits before letters.
pub fn compare_captions(a: &str, b: &str) -> Ordering {
    collation_keys(a).cmp(collation_keys(b))
}

fn collation_keys(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.chars().flat_map(char::to_lowercase).map(|c| {
        let c = fold_accent(c);
        let class = if c.is_whitespace() {
            0
        } else if c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace()) {
            1
        } else if c.is_numeric() {
            2
        } else {
            3
        };
        (class, c)
    })
}

/// Strip diacritics from lowercase Latin-1 letters
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
