//! Batch driver: runs the record builder over every document in a store.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::{info, warn};

use crate::contract::RecordBuilder;
use crate::error::{Result, StoreError};
use crate::models::record::ParsedDocument;
use crate::store::TextStore;

/// A document that produced no record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEntry {
    pub id: String,
    pub reason: String,
}

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Parsed(ParsedDocument),
    Skipped(SkippedEntry),
}

/// Records and skipped entries of one batch, in store order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub documents: Vec<ParsedDocument>,
    pub skipped: Vec<SkippedEntry>,
}

impl BatchReport {
    /// Split outcomes into records and skipped entries, keeping their order.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = EntryOutcome>) -> Self {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut report, outcome| {
                match outcome {
                    EntryOutcome::Parsed(doc) => report.documents.push(doc),
                    EntryOutcome::Skipped(entry) => report.skipped.push(entry),
                }
                report
            })
    }

    /// No record was produced.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Drives extraction over a [`TextStore`].
pub struct BatchDriver<S: TextStore> {
    store: S,
    builder: RecordBuilder,
}

impl<S: TextStore> BatchDriver<S> {
    pub fn new(store: S, builder: RecordBuilder) -> Self {
        Self { store, builder }
    }

    /// Document identifiers in processing order.
    pub fn entries(&self) -> Result<Vec<String>> {
        Ok(self.store.entries()?)
    }

    /// Read and parse one document. Never fails: problems become a skipped entry.
    pub fn process(&self, id: &str) -> EntryOutcome {
        if !self.store.has_transcript(id) {
            return skip(id, StoreError::NoTranscript(id.to_string()).to_string());
        }

        let text = match self.store.fetch(id) {
            Ok(text) => text,
            Err(e) => return skip(id, e.to_string()),
        };

        match panic::catch_unwind(AssertUnwindSafe(|| self.builder.parse(id, &text))) {
            Ok(doc) => EntryOutcome::Parsed(doc),
            Err(payload) => skip(id, format!("extraction panicked: {}", panic_message(&*payload))),
        }
    }

    /// Process every document sequentially.
    pub fn run(&self) -> Result<BatchReport> {
        let ids = self.entries()?;
        let report = BatchReport::from_outcomes(ids.iter().map(|id| self.process(id)));

        info!(
            "Batch finished: {} parsed, {} skipped",
            report.documents.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}

fn skip(id: &str, reason: String) -> EntryOutcome {
    warn!("Skipping {}: {}", id, reason);
    EntryOutcome::Skipped(SkippedEntry {
        id: id.to_string(),
        reason,
    })
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
