//! Core library for extracting fields from OCR'd Russian/Kazakh contracts.
//!
//! This crate provides:
//! - Transcript reading and writing (page headers, `(conf=..)` annotations,
//!   `.docx` copies)
//! - Contract field extraction (number, dates, amount, currency, counterparty)
//! - Document stores and a batch driver over them
//! - Configuration and result models

pub mod batch;
pub mod contract;
pub mod docx;
pub mod error;
pub mod models;
pub mod store;
pub mod transcript;

pub use batch::{BatchDriver, BatchReport, EntryOutcome, SkippedEntry};
pub use contract::{FieldExtractor, RecordBuilder};
pub use error::{DocxError, KontraktError, Result, StoreError};
pub use models::{FieldRecord, KontraktConfig, ParsedDocument, TABLE_COLUMNS};
pub use store::{FsTextStore, TextStore};
pub use transcript::{DocumentText, TranscriptLine, TranscriptWriter};
