//! Contract start/end date extraction.

use chrono::NaiveDate;

use super::normalize::{parse_date, parse_numeric_date, parse_russian_date};
use super::patterns::{DATE_NUMERIC, DATE_RUSSIAN_LONG, END_DATE_MARKERS, START_DATE_MARKERS};
use super::{Candidate, FieldExtractor};
use crate::transcript::DocumentText;

/// Lines searched on each side of a marker line.
const CONTEXT_LINES: usize = 2;

/// Date field extractor: every date-shaped substring, in line order.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = Candidate<NaiveDate>;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<Self::Output> {
        self.extract_all(doc).into_iter().next()
    }

    fn extract_all(&self, doc: &DocumentText<'_>) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (idx, line) in doc.lines().iter().enumerate() {
            // DD.MM.YYYY and friends
            for m in DATE_NUMERIC.find_iter(line) {
                if let Some(date) = parse_numeric_date(m.as_str()) {
                    results.push(Candidate::new(date, 0, m.as_str()).on_line(idx));
                }
            }

            // "12 декабря 2023"
            for m in DATE_RUSSIAN_LONG.find_iter(line) {
                if let Some(date) = parse_russian_date(m.as_str()) {
                    results.push(Candidate::new(date, 1, m.as_str()).on_line(idx));
                }
            }
        }

        results
    }
}

/// Contract validity period. Either end may be missing and no ordering
/// between them is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Extract the contract start and end dates.
///
/// Marker lines ("дата подписания", "срок действия", ...) are scanned first;
/// the first date found near a marker is kept for good. Whatever is still
/// unset then falls back to the first and last dates of the document. A lone
/// date is taken as the signing date only.
pub fn extract_date_range(text: &str) -> DateRange {
    let doc = DocumentText::new(text);
    let lines = doc.lines();

    let contextual = lines
        .iter()
        .enumerate()
        .fold(DateRange::default(), |mut acc, (idx, line)| {
            let lowered = line.to_lowercase();

            if acc.start.is_none() && contains_any(&lowered, START_DATE_MARKERS) {
                acc.start = find_date_near(lines, idx);
            }
            if acc.end.is_none() && contains_any(&lowered, END_DATE_MARKERS) {
                acc.end = find_date_near(lines, idx);
            }
            acc
        });

    let all_dates = DateExtractor::new().extract_all(&doc);

    let start = contextual
        .start
        .or_else(|| all_dates.first().map(|c| c.value));
    let end = contextual.end.or_else(|| match all_dates.as_slice() {
        [_, .., last] => Some(last.value),
        _ => None,
    });

    tracing::debug!(?start, ?end, candidates = all_dates.len(), "date range");

    DateRange { start, end }
}

/// Search the marker line, the lines after it, then the lines before it.
fn find_date_near(lines: &[&str], idx: usize) -> Option<NaiveDate> {
    let after = idx..lines.len().min(idx + CONTEXT_LINES + 1);
    let before = idx.saturating_sub(CONTEXT_LINES)..idx + 1;

    after
        .chain(before)
        .find_map(|j| parse_date(lines[j]))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_extract_all_in_line_order() {
        let doc = DocumentText::new("от 12 декабря 2023\nс 01.01.2024 по 31.12.2024");
        let all: Vec<NaiveDate> = DateExtractor::new()
            .extract_all(&doc)
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(
            all,
            vec![
                date(2023, 12, 12).unwrap(),
                date(2024, 1, 1).unwrap(),
                date(2024, 12, 31).unwrap(),
            ]
        );
    }

    #[test]
    fn test_marker_on_previous_line() {
        let text = "Дата подписания:\n01.03.2022\nДействует до\n31 декабря 2022 года";
        assert_eq!(
            extract_date_range(text),
            DateRange { start: date(2022, 3, 1), end: date(2022, 12, 31) }
        );
    }

    #[test]
    fn test_marker_searches_following_before_preceding_lines() {
        let text = "10.10.2020\nсрок действия\nтекст\n20.11.2021";
        assert_eq!(extract_date_range(text).end, date(2021, 11, 20));
    }

    #[test]
    fn test_marker_falls_back_to_preceding_lines() {
        let text = "05.05.2020\nтекст\nсрок действия\nтекст";
        assert_eq!(extract_date_range(text).end, date(2020, 5, 5));
    }

    #[test]
    fn test_first_marker_hit_is_locked() {
        let text = "Дата договора 01.02.2021\nтекст\nтекст\nтекст\nдата подписания 03.04.2021";
        assert_eq!(extract_date_range(text).start, date(2021, 2, 1));
    }

    #[test]
    fn test_marker_without_nearby_date_does_not_lock() {
        let text = "дата подписания\nа\nб\nв\nг\nдата договора 07.07.2017";
        let range = extract_date_range(text);
        assert_eq!(range.start, date(2017, 7, 7));
    }

    #[test]
    fn test_two_dates_without_markers() {
        let text = "Акт сверки\n01.01.2023\nпримечание\n15.06.2023";
        assert_eq!(
            extract_date_range(text),
            DateRange { start: date(2023, 1, 1), end: date(2023, 6, 15) }
        );
    }

    #[test]
    fn test_single_date_is_signing_date_only() {
        let text = "Протокол\nг. Астана 12 декабря 2023\nконец";
        assert_eq!(
            extract_date_range(text),
            DateRange { start: date(2023, 12, 12), end: None }
        );
    }

    #[test]
    fn test_no_dates() {
        assert_eq!(extract_date_range("нет ничего"), DateRange::default());
        assert_eq!(extract_date_range(""), DateRange::default());
    }

    #[test]
    fn test_start_after_end_is_kept() {
        let text = "действует до 01.01.2020\nдата подписания 01.01.2021";
        assert_eq!(
            extract_date_range(text),
            DateRange { start: date(2021, 1, 1), end: date(2020, 1, 1) }
        );
    }
}
