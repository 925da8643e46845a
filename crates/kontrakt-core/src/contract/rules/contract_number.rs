//! Contract number extraction.

use super::patterns::{CONTRACT_NUMBER_FALLBACK, CONTRACT_NUMBER_PATTERNS};
use super::{Candidate, FieldExtractor};
use crate::transcript::DocumentText;

/// Contract number field extractor.
///
/// Labeled forms (`№ …`, `Договор № …`, `Contract No. …`) are tried in order
/// over the whole transcript with line breaks folded; a bare token shaped
/// like `SM-1712/22` is the last resort.
pub struct ContractNumberExtractor;

impl ContractNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContractNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ContractNumberExtractor {
    type Output = Candidate<String>;

    fn extract(&self, doc: &DocumentText<'_>) -> Option<Self::Output> {
        let text = doc.folded();

        for (rank, pattern) in CONTRACT_NUMBER_PATTERNS.iter().enumerate() {
            if let Some(caps) = pattern.captures(&text) {
                return Some(Candidate::new(clean_number(&caps[1]), rank, &caps[0]));
            }
        }

        CONTRACT_NUMBER_FALLBACK.captures(&text).map(|caps| {
            Candidate::new(caps[1].to_string(), CONTRACT_NUMBER_PATTERNS.len(), &caps[0])
        })
    }

    fn extract_all(&self, doc: &DocumentText<'_>) -> Vec<Self::Output> {
        let text = doc.folded();
        let mut results = Vec::new();

        for (rank, pattern) in CONTRACT_NUMBER_PATTERNS.iter().enumerate() {
            for caps in pattern.captures_iter(&text) {
                let value = clean_number(&caps[1]);
                // The bare `№` form also matches labeled occurrences
                if results.iter().any(|r: &Candidate<String>| r.value == value) {
                    continue;
                }
                results.push(Candidate::new(value, rank, &caps[0]));
            }
        }

        let fallback_rank = CONTRACT_NUMBER_PATTERNS.len();
        for caps in CONTRACT_NUMBER_FALLBACK.captures_iter(&text) {
            if results.iter().any(|r| r.value == caps[1]) {
                continue;
            }
            results.push(Candidate::new(caps[1].to_string(), fallback_rank, &caps[0]));
        }

        results
    }
}

/// Extract the contract number from transcript text.
pub fn extract_contract_number(text: &str) -> Option<String> {
    ContractNumberExtractor::new()
        .extract(&DocumentText::new(text))
        .map(|m| m.value)
}

fn clean_number(raw: &str) -> String {
    raw.trim().trim_matches(|c| matches!(c, '.' | ',' | ';' | ':')).to_string()
}
