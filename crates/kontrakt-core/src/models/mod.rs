//! Data models.

pub mod config;
pub mod record;

pub use config::KontraktConfig;
pub use record::{FieldRecord, ParsedDocument, TABLE_COLUMNS};
