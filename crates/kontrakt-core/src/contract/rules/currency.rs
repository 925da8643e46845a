//! Currency token lookup and payment currency extraction.

use super::patterns::{
    canonical_currency, CURRENCY, CURRENCY_TOKENS, PAYMENT_CURRENCY_LABEL, PAYMENT_CURRENCY_MARKERS,
};
use super::{Candidate, FieldExtractor};
use crate::transcript::DocumentText;

/// First currency token in `text`, in canonical spelling.
pub fn find_currency(text: &str) -> Option<&'static str> {
    CURRENCY
        .captures(text)
        .and_then(|caps| canonical_currency(&caps[1]))
}

/// Currency named on an amount line. When several tokens appear, the one
/// listed first in [`CURRENCY_TOKENS`] wins, wherever it sits on the line.
pub fn amount_currency(line: &str) -> Option<&'static str> {
    CURRENCY
        .captures_iter(line)
        .filter_map(|caps| canonical_currency(&caps[1]))
        .min_by_key(|c| {
            CURRENCY_TOKENS
                .iter()
                .position(|t| t == c)
                .unwrap_or(usize::MAX)
        })
}

/// Payment currency extractor.
///
/// Looks for a line labeled "валюта платежа", "валюта договора" or just
/// "валюта", reads the currency from it or from the next line, and otherwise
/// settles for the first currency mentioned anywhere.
pub struct CurrencyExtractor;

impl CurrencyExtractor {
    pub fn new() -> Self {
        Self
    }

    fn labeled(&self, doc: &DocumentText<'_>) -> Option<Candidate<String>> {
        let lines = doc.lines();

        lines.iter().enumerate().find_map(|(idx, line)| {
            if !is_payment_label(line) {
                return None;
            }

            std::iter::once(idx)
                .chain((idx + 1 < lines.len()).then_some(idx + 1))
                .find_map(|j| {
                    find_currency(lines[j])
                        .map(|c| Candidate::new(c.to_string(), 0, lines[j]).on_line(j))
                })
        })
    }
}

impl Default for CurrencyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CurrencyExtractor {
    type Output = Candidate<String>;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<Self::Output> {
        self.labeled(doc).or_else(|| {
            CURRENCY.captures(doc.raw()).and_then(|caps| {
                canonical_currency(&caps[1]).map(|c| Candidate::new(c.to_string(), 1, &caps[0]))
            })
        })
    }

    /// Every currency mention in the document, line by line.
    fn extract_all(&self, doc: &DocumentText<'_>) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (idx, line) in doc.lines().iter().enumerate() {
            for caps in CURRENCY.captures_iter(line) {
                if let Some(c) = canonical_currency(&caps[1]) {
                    results.push(Candidate::new(c.to_string(), 1, &caps[0]).on_line(idx));
                }
            }
        }

        results
    }
}

fn is_payment_label(line: &str) -> bool {
    let lowered = line.to_lowercase();
    PAYMENT_CURRENCY_MARKERS.iter().any(|m| lowered.contains(m)) || lowered.trim() == PAYMENT_CURRENCY_LABEL
}

/// Extract the payment currency from transcript text.
pub fn extract_payment_currency(text: &str) -> Option<String> {
    CurrencyExtractor::new()
        .extract(&DocumentText::new(text))
        .map(|c| c.value)
}
