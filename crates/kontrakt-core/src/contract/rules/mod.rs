//! Rule-based field extractors for contract transcripts.

pub mod amounts;
pub mod confidence;
pub mod contract_number;
pub mod counterparty;
pub mod currency;
pub mod dates;
pub mod normalize;
pub mod patterns;

pub use amounts::{extract_amount_and_currency, AmountExtractor, AmountMatch};
pub use confidence::{average_confidence, confidence_samples};
pub use contract_number::{extract_contract_number, ContractNumberExtractor};
pub use counterparty::{extract_counterparty, CounterpartyExtractor, CounterpartyHeuristic};
pub use currency::{extract_payment_currency, find_currency, CurrencyExtractor};
pub use dates::{extract_date_range, DateExtractor, DateRange};
pub use normalize::{collapse_whitespace, normalize_amount, parse_date};

use crate::transcript::DocumentText;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the winning value for the field.
    fn extract(&self, doc: &DocumentText<'_>) -> Option<Self::Output>;

    /// Extract every candidate, in priority order.
    fn extract_all(&self, doc: &DocumentText<'_>) -> Vec<Self::Output>;
}

/// An unconfirmed extraction result tied to where and how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the source line, when the scan was line oriented.
    pub line: Option<usize>,
    /// Position of the producing pattern or heuristic in its priority list.
    pub rank: usize,
    /// Source text that was matched.
    pub source: String,
}

impl<T> Candidate<T> {
    pub fn new(value: T, rank: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            line: None,
            rank,
            source: source.into(),
        }
    }

    pub fn on_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}
