//! Extraction output models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fields recovered from one contract transcript. Every field is
/// independently present or absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Contract number as printed (`SM-1712/22`).
    pub contract_number: Option<String>,

    /// Signing / start date.
    pub date_start: Option<NaiveDate>,

    /// Expiry / end date.
    pub date_end: Option<NaiveDate>,

    /// Name of the other party.
    pub counterparty: Option<String>,

    /// Contract amount.
    pub amount: Option<f64>,

    /// Currency named next to the amount.
    pub currency: Option<String>,

    /// Currency the contract is paid in.
    pub payment_currency: Option<String>,

    /// Mean OCR recognition confidence (0.0 - 1.0).
    pub avg_confidence: Option<f64>,
}

impl FieldRecord {
    /// Number of fields that were found.
    pub fn found_count(&self) -> usize {
        [
            self.contract_number.is_some(),
            self.date_start.is_some(),
            self.date_end.is_some(),
            self.counterparty.is_some(),
            self.amount.is_some(),
            self.currency.is_some(),
            self.payment_currency.is_some(),
            self.avg_confidence.is_some(),
        ]
        .into_iter()
        .filter(|found| *found)
        .count()
    }

    /// Table cells in column order, without the leading `file_folder`.
    pub fn to_cells(&self) -> [String; 8] {
        fn cell<T: ToString>(v: &Option<T>) -> String {
            v.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        [
            cell(&self.contract_number),
            cell(&self.date_start),
            cell(&self.date_end),
            cell(&self.counterparty),
            cell(&self.amount),
            cell(&self.currency),
            cell(&self.payment_currency),
            cell(&self.avg_confidence),
        ]
    }
}

/// Column order of the batch results table.
pub const TABLE_COLUMNS: [&str; 9] = [
    "file_folder",
    "contract_number",
    "date_start",
    "date_end",
    "counterparty",
    "amount",
    "currency",
    "payment_currency",
    "avg_confidence",
];

/// Per-document artifact: the record plus a short look at the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Document identifier (the transcript's folder name).
    pub file_folder: String,

    /// Extracted fields.
    pub fields: FieldRecord,

    /// First lines of the transcript.
    pub raw_text_preview: String,
}

impl ParsedDocument {
    /// One table row, in [`TABLE_COLUMNS`] order.
    pub fn table_row(&self) -> Vec<String> {
        std::iter::once(self.file_folder.clone())
            .chain(self.fields.to_cells())
            .collect()
    }
}
