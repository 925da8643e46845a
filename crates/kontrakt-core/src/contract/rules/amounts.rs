//! Contract amount and currency extraction.

use super::currency::amount_currency;
use super::normalize::normalize_amount;
use super::patterns::{AMOUNT_KEYWORDS, NUMBER};
use super::{Candidate, FieldExtractor};
use crate::transcript::DocumentText;

/// Amount found on a line, with the currency named on that line.
///
/// Several currencies on one line are resolved by vocabulary order, not position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountMatch {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// The first line mentioning a sum ("сумма", "итого", ...) that also
    /// holds a number. Its first number decides, even when it does not
    /// normalize.
    fn keyword_line(&self, doc: &DocumentText<'_>) -> Option<Candidate<AmountMatch>> {
        doc.lines().iter().enumerate().find_map(|(idx, line)| {
            let lowered = line.to_lowercase();
            if !AMOUNT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
                return None;
            }

            let number = NUMBER.find(line)?;
            let found = AmountMatch {
                amount: normalize_amount(number.as_str()),
                currency: amount_currency(line).map(str::to_string),
            };
            Some(Candidate::new(found, 0, *line).on_line(idx))
        })
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = Candidate<AmountMatch>;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<Self::Output> {
        if let Some(found) = self.keyword_line(doc) {
            return Some(found);
        }

        // Presume the largest number in the document is the contract sum;
        // `max_by` keeps the last of equal values, so fold for the first.
        self.extract_all(doc).into_iter().fold(None, |best, c| match best {
            Some(b) if amount_of(&b) >= amount_of(&c) => Some(b),
            _ => Some(c),
        })
    }

    /// Every normalizable, non-zero number in the document with its line.
    fn extract_all(&self, doc: &DocumentText<'_>) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (idx, line) in doc.lines().iter().enumerate() {
            for m in NUMBER.find_iter(line) {
                let Some(amount) = normalize_amount(m.as_str()).filter(|v| *v != 0.0) else {
                    continue;
                };
                let found = AmountMatch {
                    amount: Some(amount),
                    currency: amount_currency(line).map(str::to_string),
                };
                results.push(Candidate::new(found, 1, m.as_str()).on_line(idx));
            }
        }

        results
    }
}

fn amount_of(c: &Candidate<AmountMatch>) -> f64 {
    c.value.amount.unwrap_or(f64::NEG_INFINITY)
}

/// Extract the contract amount and its currency from transcript text.
pub fn extract_amount_and_currency(text: &str) -> AmountMatch {
    AmountExtractor::new()
        .extract(&DocumentText::new(text))
        .map(|c| c.value)
        .unwrap_or_default()
}
