//! Counterparty name extraction.
//!
//! Contracts name the other party in many ways, so this is a chain of
//! heuristics tried in a fixed order; the first one producing a candidate wins.

use super::normalize::collapse_whitespace;
use super::patterns::{
    NAMING_CLAUSE, NAMING_STEM, ORG_FORM, ORG_FORM_SPAN, RELATIONSHIP_MARKERS, SIGNATORY_MARKERS,
};
use super::{Candidate, FieldExtractor};
use crate::transcript::DocumentText;

/// Org-form lines shorter than this are joined with the next line.
const SHORT_ORG_LINE: usize = 6;

/// Lines after a relationship marker that form its context window.
const MARKER_WINDOW_FOLLOWING: usize = 2;

/// The heuristics, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartyHeuristic {
    /// `<name>, именуемое в дальнейшем ...`
    NamingClause,
    /// First line holding an organizational form (ООО, ТОО, LLP, ...).
    OrganizationalForm,
    /// Line holding a party role (покупатель, поставщик, ...).
    RelationshipMarker,
}

impl CounterpartyHeuristic {
    pub const ALL: [CounterpartyHeuristic; 3] = [
        CounterpartyHeuristic::NamingClause,
        CounterpartyHeuristic::OrganizationalForm,
        CounterpartyHeuristic::RelationshipMarker,
    ];

    fn apply(self, lines: &[&str]) -> Option<(usize, String)> {
        match self {
            CounterpartyHeuristic::NamingClause => naming_clause(lines),
            CounterpartyHeuristic::OrganizationalForm => organizational_form(lines),
            CounterpartyHeuristic::RelationshipMarker => relationship_marker(lines),
        }
    }
}

/// Counterparty field extractor.
pub struct CounterpartyExtractor;

impl CounterpartyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CounterpartyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CounterpartyExtractor {
    type Output = Candidate<String>;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<Self::Output> {
        self.extract_all(doc).into_iter().next()
    }

    /// One candidate per heuristic that fires, highest priority first.
    fn extract_all(&self, doc: &DocumentText<'_>) -> Vec<Self::Output> {
        let lines = doc.lines();

        CounterpartyHeuristic::ALL
            .iter()
            .enumerate()
            .filter_map(|(rank, heuristic)| {
                heuristic.apply(lines).map(|(idx, name)| {
                    tracing::trace!(?heuristic, line = idx, %name, "counterparty candidate");
                    Candidate::new(name, rank, lines[idx]).on_line(idx)
                })
            })
            .collect()
    }
}

/// Extract the counterparty name from transcript text.
pub fn extract_counterparty(text: &str) -> Option<String> {
    CounterpartyExtractor::new()
        .extract(&DocumentText::new(text))
        .map(|c| c.value)
}

fn naming_clause(lines: &[&str]) -> Option<(usize, String)> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        if !line.to_lowercase().contains(NAMING_STEM) {
            return None;
        }

        let caps = NAMING_CLAUSE.captures(line)?;
        let name = trim_punctuation(caps[1].trim());
        (name.chars().count() > 3).then(|| (idx, collapse_whitespace(name)))
    })
}

fn organizational_form(lines: &[&str]) -> Option<(usize, String)> {
    let idx = lines.iter().position(|line| ORG_FORM.is_match(line))?;

    let mut name = lines[idx].to_string();
    if name.chars().count() < SHORT_ORG_LINE {
        if let Some(next) = lines.get(idx + 1) {
            name = format!("{} {}", name, next);
        }
    }

    Some((idx, collapse_whitespace(trim_punctuation(name.trim()))))
}

fn relationship_marker(lines: &[&str]) -> Option<(usize, String)> {
    let idx = lines.iter().position(|line| {
        let lowered = line.to_lowercase();
        RELATIONSHIP_MARKERS.iter().any(|m| lowered.contains(m))
    })?;
    let line = lines[idx];

    if let Some((_, after)) = line.split_once(',') {
        let after = after.trim();
        if !after.is_empty() {
            let lowered = after.to_lowercase();
            if !SIGNATORY_MARKERS.iter().any(|m| lowered.contains(m)) {
                return Some((idx, collapse_whitespace(after)));
            }
            // Signatory preamble: the company name sits on the next line
            if let Some(next) = lines.get(idx + 1) {
                return Some((idx, collapse_whitespace(next)));
            }
        }
    }

    let end = lines.len().min(idx + MARKER_WINDOW_FOLLOWING + 1);
    let window = lines[idx..end].join(" ");

    let name = match ORG_FORM_SPAN.find(&window) {
        Some(span) => span.as_str(),
        None => window.as_str(),
    };
    Some((idx, collapse_whitespace(name)))
}

fn trim_punctuation(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ',' | ':' | ';'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name(text: &str) -> Option<String> {
        extract_counterparty(text)
    }

    #[test]
    fn test_naming_clause() {
        assert_eq!(
            name("ТОО  «Алматы   Трейд», именуемое в дальнейшем «Поставщик»"),
            Some("ТОО «Алматы Трейд»".to_string())
        );
    }

    #[test]
    fn test_naming_clause_wins_over_earlier_org_line() {
        let text = "ООО Первая\nИванов Иван Иванович, именуемый в дальнейшем Заказчик";
        assert_eq!(name(text), Some("Иванов Иван Иванович".to_string()));
    }

    #[test]
    fn test_naming_clause_too_short_is_ignored() {
        let text = "Он, именуемый далее\nLLC Northwind";
        assert_eq!(name(text), Some("LLC Northwind".to_string()));
    }

    #[test]
    fn test_org_form_line() {
        let text = "Договор поставки\nООО «Ромашка»:\nг. Москва";
        assert_eq!(name(text), Some("ООО «Ромашка»".to_string()));
    }

    #[test]
    fn test_short_org_line_joins_next() {
        let text = "Продавец\nТОО\n«Степной ветер»";
        assert_eq!(name(text), Some("ТОО «Степной ветер»".to_string()));
    }

    #[test]
    fn test_marker_with_name_after_comma() {
        let text = "Покупатель, АО Казахтелеком\nадрес";
        assert_eq!(name(text), Some("АО Казахтелеком".to_string()));
    }

    #[test]
    fn test_marker_with_signatory_takes_next_line() {
        let text = "Покупатель, в лице директора Петрова П.П.\nАО «Казахтелеком»";
        assert_eq!(name(text), Some("АО «Казахтелеком»".to_string()));
    }

    #[test]
    fn test_marker_window_with_lowercase_org_form() {
        let text = "Заказчик\nреквизиты: ооо «берёзка» инн 7701\nбанк";
        assert_eq!(name(text), Some("ооо «берёзка» инн 7701 банк".to_string()));
    }

    #[test]
    fn test_marker_window_returned_whole_as_last_resort() {
        let text = "вводная\nИсполнитель\nАкционерное общество\n«Вектор»\nподпись";
        assert_eq!(name(text), Some("Исполнитель Акционерное общество «Вектор»".to_string()));
    }

    #[test]
    fn test_signatory_on_last_line_uses_window() {
        let text = "прочее\nПоставщик, в лице директора";
        assert_eq!(name(text), Some("Поставщик, в лице директора".to_string()));
    }

    #[test]
    fn test_marker_with_nothing_after_comma_uses_window() {
        assert_eq!(
            relationship_marker(&["Покупатель,", "ООО Ромашка"]),
            Some((0, "ООО Ромашка".to_string()))
        );

        let text = "Заказчик,\nИванов Иван\nадрес";
        assert_eq!(name(text), Some("Заказчик, Иванов Иван адрес".to_string()));
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(name("просто текст\nбез сторон"), None);
        assert_eq!(name(""), None);
    }

    #[test]
    fn test_extract_all_ranks_heuristics() {
        let doc = DocumentText::new("ООО Ромашка, именуемое в дальнейшем Продавец");
        let all = CounterpartyExtractor::new().extract_all(&doc);
        let ranked: Vec<(usize, &str)> = all.iter().map(|c| (c.rank, c.value.as_str())).collect();
        assert_eq!(
            ranked,
            vec![
                (0, "ООО Ромашка"),
                (1, "ООО Ромашка, именуемое в дальнейшем Продавец"),
                (2, "именуемое в дальнейшем Продавец"),
            ]
        );
    }
}
