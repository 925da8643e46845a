//! Error types for the kontrakt-core library.
//!
//! Field extraction itself never fails: a field that cannot be found is
//! `None`. Errors only come from reading transcripts and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the kontrakt library.
#[derive(Error, Debug)]
pub enum KontraktError {
    /// Document store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store root does not exist.
    #[error("input location not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The document has no transcript file.
    #[error("no transcript found for {0}")]
    NoTranscript(String),

    /// The transcript exists but holds no text.
    #[error("transcript for {0} is empty")]
    EmptyTranscript(String),

    /// The transcript could not be read.
    #[error("failed to read transcript for {id}: {reason}")]
    Read { id: String, reason: String },
}

/// Errors reading a `.docx` transcript.
#[derive(Error, Debug)]
pub enum DocxError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a readable zip archive, or lacks the document part.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The document part is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Result type for the kontrakt library.
pub type Result<T> = std::result::Result<T, KontraktError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KontraktError::from(StoreError::NoTranscript("doc-1".into()));
        assert_eq!(err.to_string(), "store error: no transcript found for doc-1");

        let err = StoreError::MissingInput(PathBuf::from("data/output"));
        assert_eq!(err.to_string(), "input location not found: data/output");
    }
}
