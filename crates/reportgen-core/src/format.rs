//! Value formatting: raw cell value + number format code -> typed value and
//! display text.
//!
//! Formatting is locale-fixed to en-US (`,` thousands separator, `.` decimal
//! point). Numeric coercion strips everything except digits, `.` and `-`
//! before parsing, which is lossy for inputs written in other locales.

use crate::value::{CellValue, RawValue};

/// Recognized kinds of number format codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormatCode {
    /// `0%`, `0.0%`: stored as `value * 100`
    Percent { decimals: u8 },
    /// `$#,###`: rounded to whole units, minus sign before the symbol
    Currency,
    /// `#,##0.00`: fixed fraction digits with grouping
    Decimal { decimals: u8 },
    /// `#,##0`, `0`: whole numbers with grouping
    Integer,
}

impl NumberFormatCode {
    /// Classify a format code. Returns `None` for blank codes and for codes
    /// without any numeric placeholder (`@`, `General`, free text), which are
    /// rendered as raw passthrough.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        if code.contains('%') {
            return Some(NumberFormatCode::Percent {
                decimals: fraction_digits(code),
            });
        }
        if code.contains('$') {
            return Some(NumberFormatCode::Currency);
        }
        if !code.contains(['0', '#']) {
            return None;
        }
        if code.contains('.') {
            Some(NumberFormatCode::Decimal {
                decimals: fraction_digits(code),
            })
        } else {
            Some(NumberFormatCode::Integer)
        }
    }

    /// Map a coerced source number to the value stored in numeric cells
    pub fn to_numeric(&self, value: f64) -> f64 {
        match self {
            NumberFormatCode::Percent { .. } => value * 100.0,
            NumberFormatCode::Currency => round_half_up(value),
            NumberFormatCode::Decimal { .. } | NumberFormatCode::Integer => value,
        }
    }

    /// Display text for a value already mapped by [`Self::to_numeric`].
    ///
    /// Totals rows rely on this: the sum of numeric cells is displayed with
    /// the same rules as the cells themselves.
    pub fn display_numeric(&self, numeric: f64) -> String {
        match *self {
            NumberFormatCode::Percent { decimals: 0 } => {
                format!("{}%", format_fixed(round_half_up(numeric), 0, false))
            }
            NumberFormatCode::Percent { decimals } => {
                format!("{}%", format_fixed(numeric, decimals, false))
            }
            NumberFormatCode::Currency => {
                let rounded = round_half_up(numeric);
                if rounded < 0.0 {
                    format!("-${}", format_fixed(-rounded, 0, true))
                } else {
                    format!("${}", format_fixed(rounded, 0, true))
                }
            }
            NumberFormatCode::Decimal { decimals } => format_fixed(numeric, decimals, true),
            NumberFormatCode::Integer => format_fixed(numeric, 0, true),
        }
    }
}

/// A formatted cell: the typed value for numeric storage and the text shown
/// to readers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormattedValue {
    /// Value for backends that store numbers natively
    pub value: CellValue,
    /// Human-readable text
    pub display: String,
}

impl FormattedValue {
    fn passthrough(raw: &RawValue) -> Self {
        Self {
            value: CellValue::from(raw),
            display: raw.as_text().into_owned(),
        }
    }
}

/// Format one raw value with an optional number format code.
///
/// Never fails: unrecognized codes and values that do not coerce to a number
/// fall back to the raw value.
pub fn format_value(raw: &RawValue, code: Option<&str>) -> FormattedValue {
    let Some(kind) = code.and_then(NumberFormatCode::parse) else {
        return FormattedValue::passthrough(raw);
    };
    let Some(number) = coerce_number(raw) else {
        return FormattedValue::passthrough(raw);
    };

    let numeric = kind.to_numeric(number);
    if !numeric.is_finite() {
        return FormattedValue::passthrough(raw);
    }
    FormattedValue {
        value: CellValue::Number(numeric),
        display: kind.display_numeric(numeric),
    }
}

/// Coerce a raw value to a number: keep `[0-9.-]`, then parse the longest
/// valid float prefix.
pub fn coerce_number(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Empty => None,
        RawValue::Number(n) => n.is_finite().then_some(*n),
        RawValue::Text(s) => {
            let stripped: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            parse_float_prefix(&stripped).filter(|n| n.is_finite())
        }
    }
}

/// Parse `-?digits?(.digits?)?` from the start of `s`, ignoring trailing
/// garbage; at least one digit is required.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }
    s[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// Placeholders (`0` or `#`) directly after the first decimal point
fn fraction_digits(code: &str) -> u8 {
    code.split_once('.')
        .map(|(_, frac)| {
            frac.chars()
                .take_while(|c| *c == '0' || *c == '#')
                .count()
                .min(20) as u8
        })
        .unwrap_or(0)
}

/// Round half toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`)
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Fixed-point rendering with half-away-from-zero rounding and optional
/// thousands grouping. A value that rounds to zero loses its sign.
pub fn format_fixed(value: f64, decimals: u8, grouping: bool) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scale = 10u128.pow(decimals as u32);
    let scaled = (value.abs() * scale as f64).round();
    if scaled >= 1e36 {
        return value.to_string();
    }
    let scaled = scaled as u128;

    let int_part = scaled / scale;
    let frac_part = scaled % scale;

    let mut out = String::new();
    if value < 0.0 && scaled != 0 {
        out.push('-');
    }
    if grouping {
        out.push_str(&group_thousands(int_part));
    } else {
        out.push_str(&int_part.to_string());
    }
    if decimals > 0 {
        out.push('.');
        out.push_str(&format!("{:0width$}", frac_part, width = decimals as usize));
    }
    out
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let first_group = match bytes.len() % 3 {
        0 => 3,
        n => n,
    };
    out.push_str(&digits[..first_group]);
    let mut idx = first_group;
    while idx < bytes.len() {
        out.push(',');
        out.push_str(&digits[idx..idx + 3]);
        idx += 3;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(raw: impl Into<RawValue>, code: &str) -> String {
        format_value(&raw.into(), Some(code)).display
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!(
            NumberFormatCode::parse("0%"),
            Some(NumberFormatCode::Percent { decimals: 0 })
        );
        assert_eq!(
            NumberFormatCode::parse("0.0%"),
            Some(NumberFormatCode::Percent { decimals: 1 })
        );
        assert_eq!(
            NumberFormatCode::parse("$#,###"),
            Some(NumberFormatCode::Currency)
        );
        assert_eq!(
            NumberFormatCode::parse("#,##0.00"),
            Some(NumberFormatCode::Decimal { decimals: 2 })
        );
        assert_eq!(
            NumberFormatCode::parse("#,##0"),
            Some(NumberFormatCode::Integer)
        );
        assert_eq!(NumberFormatCode::parse("@"), None);
        assert_eq!(NumberFormatCode::parse("General"), None);
        assert_eq!(NumberFormatCode::parse("  "), None);
    }

    #[test]
    fn test_negative_currency_sign_precedes_symbol() {
        assert_eq!(display(-1234.0, "$#,###"), "-$1,234");
        assert_eq!(display("-1234", "$#,###"), "-$1,234");
    }

    #[test]
    fn test_currency() {
        let formatted = format_value(&RawValue::text("$1,234,567.60"), Some("$#,###"));
        assert_eq!(formatted.display, "$1,234,568");
        assert_eq!(formatted.value, CellValue::Number(1234568.0));
        assert_eq!(display(0.4, "$#,###"), "$0");
    }

    #[test]
    fn test_percent_rounds() {
        let formatted = format_value(&RawValue::Number(0.256), Some("0%"));
        assert_eq!(formatted.display, "26%");
        assert_eq!(formatted.value, CellValue::Number(25.6));
        assert_eq!(display("0.125", "0%"), "13%");
        assert_eq!(display("0.2567", "0.0%"), "25.7%");
    }

    #[test]
    fn test_decimal_fixed_digits() {
        assert_eq!(display("1234.5", "#,##0.00"), "1,234.50");
        assert_eq!(display("-0.125", "0.00"), "-0.13");
        assert_eq!(display("1000000", "0.0"), "1,000,000.0");
    }

    #[test]
    fn test_integer_grouping() {
        assert_eq!(display("1234567.89", "#,##0"), "1,234,568");
        assert_eq!(display("999", "0"), "999");
        assert_eq!(display("-1000", "0"), "-1,000");
    }

    #[test]
    fn test_no_code_passthrough() {
        let formatted = format_value(&RawValue::text("abc"), None);
        assert_eq!(formatted.display, "abc");
        assert_eq!(formatted.value, CellValue::Text("abc".into()));

        let formatted = format_value(&RawValue::Empty, None);
        assert_eq!(formatted.display, "");
        assert_eq!(formatted.value, CellValue::Empty);

        let formatted = format_value(&RawValue::Number(7.0), Some(""));
        assert_eq!(formatted.display, "7");
        assert_eq!(formatted.value, CellValue::Number(7.0));
    }

    #[test]
    fn test_unparseable_value_falls_back_to_raw() {
        let formatted = format_value(&RawValue::text("n/a"), Some("0%"));
        assert_eq!(formatted.display, "n/a");
        assert_eq!(formatted.value, CellValue::Text("n/a".into()));
    }

    #[test]
    fn test_unrecognized_code_falls_back_to_raw() {
        let formatted = format_value(&RawValue::text("0012"), Some("@"));
        assert_eq!(formatted.display, "0012");
        assert_eq!(formatted.value, CellValue::Text("0012".into()));
    }

    #[test]
    fn test_overflowing_text_falls_back_to_raw() {
        let digits = "9".repeat(400);
        let formatted = format_value(&RawValue::text(digits.clone()), Some("$#,###"));
        assert_eq!(formatted.value, CellValue::Text(digits.clone()));
        assert_eq!(formatted.display, digits);

        let formatted = format_value(&RawValue::Number(f64::MAX), Some("0%"));
        assert_eq!(formatted.value, CellValue::Number(f64::MAX));
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("12.5"), Some(12.5));
        assert_eq!(parse_float_prefix("-.5"), Some(-0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1.2.3"), Some(1.2));
        assert_eq!(parse_float_prefix("1-2"), Some(1.0));
        assert_eq!(parse_float_prefix("--5"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_display_numeric_matches_format_value() {
        let kind = NumberFormatCode::Currency;
        let numeric = kind.to_numeric(-1234.4);
        assert_eq!(kind.display_numeric(numeric), "-$1,234");
    }
}
