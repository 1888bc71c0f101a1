use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

const INVISIBLE: [char; 2] = ['\u{feff}', '\u{200b}'];
const SPACES: [char; 3] = [' ', '\u{a0}', '\u{202f}'];

/// Header key: invisible characters removed, whitespace collapsed, lowercase.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(&INVISIBLE[..], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Parse a spreadsheet number such as `12,5`, `1 250.00`, or `25 %`.
pub(crate) fn parse_decimal(value: &str) -> Result<Decimal, String> {
    let mut cleaned: String = value
        .chars()
        .filter(|ch| !INVISIBLE.contains(ch) && !SPACES.contains(ch))
        .collect();
    if let Some(stripped) = cleaned.strip_suffix('%') {
        cleaned = stripped.to_string();
    }

    let normalized = if cleaned.contains('.') {
        cleaned.replace(',', "")
    } else {
        cleaned.replace(',', ".")
    };

    Decimal::from_str(&normalized).map_err(|_| format!("'{}' is not a number", value.trim()))
}

pub(crate) fn parse_days(value: &str) -> Result<u32, String> {
    let days = parse_decimal(value)?;
    if !days.fract().is_zero() {
        return Err(format!("'{}' is not a whole number of days", value.trim()));
    }
    days.to_u32()
        .ok_or_else(|| format!("'{}' is not a valid number of days", value.trim()))
}
