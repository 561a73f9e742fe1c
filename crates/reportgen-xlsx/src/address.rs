//! A1-style cell references

use crate::error::{XlsxError, XlsxResult};

/// Highest column index a worksheet can hold (XFD)
pub const MAX_COL: u32 = 16_383;

/// Convert a 0-based column index to letters (0 = A, 25 = Z, 26 = AA)
pub fn column_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col + 1;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Convert column letters to a 0-based index
pub fn letters_to_column(letters: &str) -> XlsxResult<u32> {
    if letters.is_empty() {
        return Err(XlsxError::Parse("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(XlsxError::Parse(format!("invalid column letter '{}'", c)));
        }
        col = col
            .saturating_mul(26)
            .saturating_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    let col = col - 1;
    if col > MAX_COL {
        return Err(XlsxError::Parse(format!("column '{}' out of range", letters)));
    }
    Ok(col)
}

/// A1 reference of a 0-based `(row, col)`
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", column_to_letters(col), row + 1)
}

/// A1:B2 reference of an inclusive 0-based range
pub fn range_ref(first_row: u32, first_col: u32, last_row: u32, last_col: u32) -> String {
    format!(
        "{}:{}",
        cell_ref(first_row, first_col),
        cell_ref(last_row, last_col)
    )
}

/// Split an A1 reference (`$` markers allowed) into 0-based `(row, col)`
pub fn parse_cell_ref(s: &str) -> XlsxResult<(u32, u32)> {
    let s = s.trim();
    let letters: String = s
        .chars()
        .filter(|c| *c != '$')
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let digits: String = s
        .chars()
        .filter(|c| *c != '$')
        .skip(letters.len())
        .collect();

    let col = letters_to_column(&letters)?;
    let row: u32 = digits
        .parse()
        .ok()
        .filter(|r| *r >= 1)
        .ok_or_else(|| XlsxError::Parse(format!("invalid cell reference '{}'", s)))?;

    Ok((row - 1, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(MAX_COL), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 0);
        assert_eq!(letters_to_column("aa").unwrap(), 26);
        assert_eq!(letters_to_column("XFD").unwrap(), MAX_COL);
        assert!(letters_to_column("XFE").is_err());
        assert!(letters_to_column("").is_err());
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1").unwrap(), (0, 0));
        assert_eq!(parse_cell_ref("$C$12").unwrap(), (11, 2));
        assert!(parse_cell_ref("A0").is_err());
        assert!(parse_cell_ref("12").is_err());
    }

    #[test]
    fn test_range_ref() {
        assert_eq!(range_ref(0, 0, 0, 4), "A1:E1");
    }
}
