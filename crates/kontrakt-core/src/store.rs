//! Document store: where transcripts come from.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::docx::read_docx_text;
use crate::error::StoreError;
use crate::models::config::KontraktConfig;

/// Source of document transcripts, keyed by document identifier.
pub trait TextStore: Send + Sync {
    /// Document identifiers in a stable order.
    fn entries(&self) -> Result<Vec<String>, StoreError>;

    /// Check whether a transcript exists for the document.
    fn has_transcript(&self, id: &str) -> bool;

    /// Fetch the transcript as a single string.
    fn fetch(&self, id: &str) -> Result<String, StoreError>;
}

/// Store backed by a directory with one subdirectory per document.
///
/// ```text
/// data/output/
///   scan_001/result.txt
///   scan_002/result.docx
/// ```
#[derive(Debug, Clone)]
pub struct FsTextStore {
    root: PathBuf,
    transcript_files: Vec<String>,
}

impl FsTextStore {
    /// Create a store over `root`, looking for the given transcript file names.
    pub fn new(root: impl Into<PathBuf>, transcript_files: Vec<String>) -> Self {
        Self {
            root: root.into(),
            transcript_files,
        }
    }

    /// Create a store from the input section of the configuration.
    pub fn from_config(config: &KontraktConfig) -> Self {
        Self::new(
            config.input.output_base.clone(),
            config.input.transcript_files.clone(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding the document's files.
    pub fn document_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// Existing transcript files of the document, in configured order.
    fn transcript_paths(&self, id: &str) -> Vec<PathBuf> {
        let dir = self.document_dir(id);
        self.transcript_files
            .iter()
            .map(|name| dir.join(name))
            .filter(|path| path.is_file())
            .collect()
    }
}

/// Read one transcript file; `.docx` files are unpacked to their paragraphs.
fn read_transcript(path: &Path) -> Result<String, String> {
    let is_docx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"));

    if is_docx {
        read_docx_text(path).map_err(|e| e.to_string())
    } else {
        fs::read_to_string(path).map_err(|e| e.to_string())
    }
}

impl TextStore for FsTextStore {
    fn entries(&self) -> Result<Vec<String>, StoreError> {
        let read_dir =
            fs::read_dir(&self.root).map_err(|_| StoreError::MissingInput(self.root.clone()))?;

        let mut ids: Vec<String> = read_dir
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        ids.sort();

        debug!("Found {} document folders in {}", ids.len(), self.root.display());
        Ok(ids)
    }

    fn has_transcript(&self, id: &str) -> bool {
        !self.transcript_paths(id).is_empty()
    }

    /// First transcript file with any text; blank files fall through to the next one.
    fn fetch(&self, id: &str) -> Result<String, StoreError> {
        let paths = self.transcript_paths(id);
        if paths.is_empty() {
            return Err(StoreError::NoTranscript(id.to_string()));
        }

        for path in paths {
            trace!("Reading {}", path.display());
            let text = read_transcript(&path).map_err(|reason| StoreError::Read {
                id: id.to_string(),
                reason,
            })?;

            if !text.trim().is_empty() {
                return Ok(text);
            }
            debug!("{} is blank", path.display());
        }

        Err(StoreError::EmptyTranscript(id.to_string()))
    }
}
