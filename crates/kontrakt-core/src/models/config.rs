//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{KontraktError, Result};

/// Main configuration for kontrakt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KontraktConfig {
    /// Where transcripts are read from.
    pub input: InputConfig,

    /// What gets written back.
    pub output: OutputConfig,

    /// Batch execution.
    pub batch: BatchConfig,
}

/// Document store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Root directory; each subdirectory is one document.
    pub output_base: PathBuf,

    /// Transcript file names tried in order inside a document folder.
    pub transcript_files: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            output_base: PathBuf::from("data").join("output"),
            transcript_files: vec!["result.txt".to_string(), "result.docx".to_string()],
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write a JSON artifact into each document folder.
    pub write_artifacts: bool,

    /// Artifact file name.
    pub artifact_file: String,

    /// Number of transcript lines kept in the artifact preview.
    pub preview_lines: usize,

    /// Results table file name, written under the input root.
    pub results_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_artifacts: true,
            artifact_file: "parsed.json".to_string(),
            preview_lines: 40,
            results_file: "results.csv".to_string(),
        }
    }
}

/// Batch execution configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Documents processed concurrently.
    pub jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { jobs: 4 }
    }
}

impl KontraktConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.input.transcript_files.is_empty() {
            return Err(KontraktError::Config("input.transcript_files is empty".into()));
        }
        if self.batch.jobs == 0 {
            return Err(KontraktError::Config("batch.jobs must be at least 1".into()));
        }
        Ok(())
    }

    /// Path of the batch results table.
    pub fn results_path(&self) -> PathBuf {
        self.input.output_base.join(&self.output.results_file)
    }
}
