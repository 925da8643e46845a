//! Markers and regex patterns for contract field extraction.
//!
//! Every list is ordered: earlier entries take priority over later ones.

use lazy_static::lazy_static;
use regex::Regex;

/// Phrases that put a start (signing) date nearby.
pub const START_DATE_MARKERS: &[&str] = &[
    "дата заключения",
    "дата подписания",
    "дата договора",
    "дата составления",
    "подписан",
];

/// Phrases that put an end (expiry) date nearby.
pub const END_DATE_MARKERS: &[&str] = &["дата окончания", "срок действия", "действует до", "по ", "до "];

/// Line keywords that announce the contract amount.
pub const AMOUNT_KEYWORDS: &[&str] = &["сумма", "стоимость", "итого", "цена", "amount", "total"];

/// Currency vocabulary in canonical spelling.
pub const CURRENCY_TOKENS: &[&str] = &[
    "KZT", "тенге", "RUB", "руб", "рублей", "USD", "доллар", "EUR", "евро",
];

/// Organizational-form tokens (legal entity prefixes).
pub const ORG_FORMS: &[&str] = &["ООО", "ОАО", "ТОО", "ПАО", "ЗАО", "ИП", "LLP", "LLC", "TOO"];

/// Party role words used in contract preambles.
pub const RELATIONSHIP_MARKERS: &[&str] = &[
    "покупатель",
    "продавец",
    "контрагент",
    "поставщик",
    "заказчик",
    "исполнитель",
];

/// Stem of "именуемое в дальнейшем".
pub const NAMING_STEM: &str = "именуем";

/// Words that open a signatory clause ("в лице директора ...").
pub const SIGNATORY_MARKERS: &[&str] = &["в лице", "действующ", "директор"];

/// Phrases that label the payment currency.
pub const PAYMENT_CURRENCY_MARKERS: &[&str] = &["валюта платежа", "валюта договора"];

/// A line consisting of this word alone also labels the payment currency.
pub const PAYMENT_CURRENCY_LABEL: &str = "валюта";

lazy_static! {
    // Contract numbers, highest priority first
    pub static ref CONTRACT_NUMBER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)№\s*([A-ZА-ЯЁ0-9\-._/]{3,})").unwrap(),
        Regex::new(r"(?i)Договор\s*№\s*([A-ZА-ЯЁ0-9\-._/]{3,})").unwrap(),
        Regex::new(r"(?i)ДОГОВОР\s*№\s*([A-ZА-ЯЁ0-9\-._/]{3,})").unwrap(),
        Regex::new(r"(?i)Contract\s*No\.?\s*([A-Z0-9\-._/]{3,})").unwrap(),
    ];

    // Short token shaped like "SM-1712/22"
    pub static ref CONTRACT_NUMBER_FALLBACK: Regex = Regex::new(
        r"\b([A-ZА-ЯЁ]{1,3}[-/]\d{2,6}/?\d{0,4})\b"
    ).unwrap();

    // 01.03.2022, 1-3-22, 01/03/2022
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"(\d{1,2})([.\-/])(\d{1,2})([.\-/])(\d{2,4})"
    ).unwrap();

    // 12 декабря 2023
    pub static ref DATE_RUSSIAN_LONG: Regex = Regex::new(
        r"(\d{1,2})\s+([А-Яа-яёЁ]+)\s+(\d{4})"
    ).unwrap();

    // 3 209 315,71 or 3209315.71 or 5000
    pub static ref NUMBER: Regex = Regex::new(
        r"\d{1,3}(?:[ \u{00a0}]\d{3})+(?:[.,]\d+)?|\d+(?:[.,]\d+)?"
    ).unwrap();

    pub static ref CURRENCY: Regex = Regex::new(
        r"(?i)\b(KZT|тенге|RUB|рублей|руб|USD|доллар|EUR|евро)\b"
    ).unwrap();

    pub static ref ORG_FORM: Regex = Regex::new(
        r"\b(?:ООО|ОАО|ТОО|ПАО|ЗАО|ИП|LLP|LLC|TOO)\b"
    ).unwrap();

    // Org form plus the name that follows it, inside a joined context window
    pub static ref ORG_FORM_SPAN: Regex = Regex::new(
        r"(?i)\b(?:ООО|ТОО|ОАО|ЗАО|ПАО|LLP|LLC)\b.{0,80}"
    ).unwrap();

    // "<name>, именуемое в дальнейшем ..."
    pub static ref NAMING_CLAUSE: Regex = Regex::new(
        r"(?i)(.{3,200}?)\s*,?\s*именуем"
    ).unwrap();

    // Upstream OCR annotation "(conf=0.97)"
    pub static ref CONFIDENCE_ANNOTATION: Regex = Regex::new(
        r"\(conf=([0-9.]+)\)"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Map a matched currency token to its canonical vocabulary spelling.
pub fn canonical_currency(token: &str) -> Option<&'static str> {
    let lowered = token.to_lowercase();
    CURRENCY_TOKENS
        .iter()
        .copied()
        .find(|canonical| canonical.to_lowercase() == lowered)
}
