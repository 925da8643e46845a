//! Whitespace, amount and date canonicalization shared by all extractors.

use chrono::NaiveDate;

use super::patterns::{DATE_NUMERIC, DATE_RUSSIAN_LONG, WHITESPACE_RUN};

/// Replace every whitespace run with a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim().to_string()
}

/// Parse an amount written with space, comma or dot grouping.
///
/// When both `.` and `,` occur, the one that comes last is the decimal
/// separator and the other is dropped as a thousands separator
/// (`1,234.56` and `1.234,56` are both `1234.56`). A lone `,` is a decimal
/// separator. Anything that still fails to parse yields `None`.
pub fn normalize_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != '\u{00a0}' && *c != '\u{202f}')
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Find and parse the first date in `s`.
///
/// Numeric `D.M.Y` (separators `.`, `-`, `/`, used consistently; 2- or 4-digit
/// year) is tried before the long Russian form `12 декабря 2023`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    parse_numeric_date(s).or_else(|| parse_russian_date(s))
}

/// Separator and year width combinations accepted for numeric dates, in order.
const NUMERIC_DATE_FORMATS: &[(char, usize)] = &[
    ('.', 4),
    ('.', 2),
    ('-', 4),
    ('/', 4),
    ('/', 2),
    ('-', 2),
];

pub(crate) fn parse_numeric_date(s: &str) -> Option<NaiveDate> {
    let caps = DATE_NUMERIC.captures(s)?;

    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[3].parse().ok()?;
    let year_text = &caps[5];
    let first_sep = caps[2].chars().next()?;
    let second_sep = caps[4].chars().next()?;

    let known_format = NUMERIC_DATE_FORMATS
        .iter()
        .any(|&(sep, width)| first_sep == sep && second_sep == sep && year_text.len() == width);
    if !known_format {
        return None;
    }

    let year = expand_year(year_text.parse().ok()?);
    NaiveDate::from_ymd_opt(year, month, day)
}

pub(crate) fn parse_russian_date(s: &str) -> Option<NaiveDate> {
    let caps = DATE_RUSSIAN_LONG.captures(s)?;

    let day: u32 = caps[1].parse().ok()?;
    let month = russian_month_to_number(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Two-digit years belong to the 2000s.
fn expand_year(year: i32) -> i32 {
    if year < 100 { 2000 + year } else { year }
}

/// Resolve a Russian month word by its first three letters (`дек`, `декабря`,
/// `Декабрь`) or, for May, by the genitive form.
fn russian_month_to_number(word: &str) -> Option<u32> {
    let lowered = word.to_lowercase();
    let prefix: String = lowered.chars().take(3).collect();

    let month = match prefix.as_str() {
        "янв" => 1,
        "фев" => 2,
        "мар" => 3,
        "апр" => 4,
        "май" | "мая" => 5,
        "июн" => 6,
        "июл" => 7,
        "авг" => 8,
        "сен" => 9,
        "окт" => 10,
        "ноя" => 11,
        "дек" => 12,
        _ => return None,
    };
    Some(month)
}
