//! Assembles a field record from all extractors.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::record::{FieldRecord, ParsedDocument};
use crate::transcript::DocumentText;

use super::rules::{
    average_confidence, extract_date_range, AmountExtractor, ContractNumberExtractor,
    CounterpartyExtractor, CurrencyExtractor, DateRange, FieldExtractor,
};

/// Default number of transcript lines kept in a preview.
pub const DEFAULT_PREVIEW_LINES: usize = 40;

/// Runs every field extractor over one transcript.
///
/// Extractors are independent of each other and never fail; a field that
/// cannot be found stays `None`.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    preview_lines: usize,
}

impl RecordBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            preview_lines: DEFAULT_PREVIEW_LINES,
        }
    }

    /// Set how many transcript lines go into the artifact preview.
    pub fn with_preview_lines(mut self, lines: usize) -> Self {
        self.preview_lines = lines;
        self
    }

    /// Extract the field record from transcript text.
    pub fn build(&self, text: &str) -> FieldRecord {
        let doc = DocumentText::new(text);

        let contract_number = ContractNumberExtractor::new().extract(&doc).map(|c| c.value);
        let DateRange { start, end } = extract_date_range(text);
        let amount = AmountExtractor::new()
            .extract(&doc)
            .map(|c| c.value)
            .unwrap_or_default();
        let counterparty = CounterpartyExtractor::new().extract(&doc).map(|c| c.value);
        let payment_currency = CurrencyExtractor::new().extract(&doc).map(|c| c.value);

        FieldRecord {
            contract_number,
            date_start: start,
            date_end: end,
            counterparty,
            amount: amount.amount,
            currency: amount.currency,
            payment_currency,
            avg_confidence: average_confidence(text),
        }
    }

    /// Extract the record and wrap it into the per-document artifact.
    pub fn parse(&self, file_folder: &str, text: &str) -> ParsedDocument {
        let start = Instant::now();
        let fields = self.build(text);

        info!(
            document = file_folder,
            found = fields.found_count(),
            "extracted {} of 8 fields in {}ms",
            fields.found_count(),
            start.elapsed().as_millis()
        );
        debug!(document = file_folder, ?fields);

        ParsedDocument {
            file_folder: file_folder.to_string(),
            fields,
            raw_text_preview: DocumentText::new(text).preview(self.preview_lines),
        }
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{TranscriptLine, TranscriptWriter};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "Договор № 123-AB\n\
                          дата подписания\n\
                          01.03.2022\n\
                          Сумма договора: 1 500 000,00 KZT\n\
                          ООО Ромашка, именуемое в дальнейшем Продавец";

    #[test]
    fn test_build_sample_contract() {
        let record = RecordBuilder::new().build(SAMPLE);

        assert_eq!(record.contract_number.as_deref(), Some("123-AB"));
        assert_eq!(record.date_start, NaiveDate::from_ymd_opt(2022, 3, 1));
        assert_eq!(record.date_end, None);
        assert_eq!(record.amount, Some(1500000.0));
        assert!(record.currency.as_deref().unwrap().contains("KZT"));
        assert_eq!(record.counterparty.as_deref(), Some("ООО Ромашка"));
        assert_eq!(record.payment_currency.as_deref(), Some("KZT"));
        assert_eq!(record.avg_confidence, None);
    }

    #[test]
    fn test_build_from_ocr_transcript() {
        let mut writer = TranscriptWriter::new();
        writer.push_page(
            1,
            &[
                TranscriptLine::new("ДОГОВОР ПОСТАВКИ № SM-1712/22", Some(0.98)),
                TranscriptLine::new("г. Алматы 12 декабря 2023", Some(0.94)),
                TranscriptLine::new("ТОО «Алматы Трейд», именуемое в дальнейшем Поставщик", Some(0.90)),
            ],
        );
        writer.push_page(
            2,
            &[
                TranscriptLine::new("Срок действия договора:", Some(0.92)),
                TranscriptLine::new("31.12.2024", Some(0.96)),
                TranscriptLine::new("Итого: 3 209 315,71 тенге", Some(0.88)),
                TranscriptLine::new("Валюта платежа:", None),
                TranscriptLine::new("USD", Some(0.92)),
            ],
        );
        let record = RecordBuilder::new().build(&writer.finish());

        assert_eq!(record.contract_number.as_deref(), Some("SM-1712/22"));
        assert_eq!(record.date_start, NaiveDate::from_ymd_opt(2023, 12, 12));
        assert_eq!(record.date_end, NaiveDate::from_ymd_opt(2024, 12, 31));
        assert_eq!(record.counterparty.as_deref(), Some("ТОО «Алматы Трейд»"));
        assert_eq!(record.amount, Some(3209315.71));
        assert_eq!(record.currency.as_deref(), Some("тенге"));
        assert_eq!(record.payment_currency.as_deref(), Some("USD"));

        let avg = record.avg_confidence.unwrap();
        assert!((avg - 0.9285714285714286).abs() < 1e-9, "{avg}");
    }

    #[test]
    fn test_empty_text_yields_empty_record() {
        assert_eq!(RecordBuilder::new().build(""), FieldRecord::default());
    }

    #[test]
    fn test_parse_wraps_preview() {
        let doc = RecordBuilder::new().with_preview_lines(2).parse("scan_7", SAMPLE);
        assert_eq!(doc.file_folder, "scan_7");
        assert_eq!(doc.raw_text_preview, "Договор № 123-AB\nдата подписания");
        assert_eq!(doc.fields, RecordBuilder::new().build(SAMPLE));
    }
}
