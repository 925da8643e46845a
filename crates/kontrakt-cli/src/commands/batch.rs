//! Batch command - extract fields from every document folder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_xlsxwriter::Workbook;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use kontrakt_core::{
    BatchDriver, BatchReport, EntryOutcome, FsTextStore, KontraktError, ParsedDocument,
    RecordBuilder, SkippedEntry, StoreError, TABLE_COLUMNS,
};

/// Arguments for the batch command.
#[derive(Args, Default)]
pub struct BatchArgs {
    /// Directory holding one folder per document (default: input.output_base)
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Number of documents processed in parallel
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Do not write a JSON artifact into each document folder
    #[arg(long)]
    no_artifacts: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(dir) = args.input_dir {
        config.input.output_base = dir;
    }
    if let Some(jobs) = args.jobs {
        config.batch.jobs = jobs;
    }
    if args.no_artifacts {
        config.output.write_artifacts = false;
    }
    config.validate()?;

    let store = FsTextStore::from_config(&config);
    let builder = RecordBuilder::new().with_preview_lines(config.output.preview_lines);
    let driver = Arc::new(BatchDriver::new(store, builder));

    let ids = match driver.entries() {
        Ok(ids) => ids,
        Err(KontraktError::Store(err @ StoreError::MissingInput(_))) => {
            warn!("{}", err);
            println!("{} {}", style("⚠").yellow(), err);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if ids.is_empty() {
        warn!("No document folders in {}", config.input.output_base.display());
        println!(
            "{} No document folders in {}",
            style("⚠").yellow(),
            config.input.output_base.display()
        );
        return Ok(());
    }

    println!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        ids.len()
    );

    let progress = ProgressBar::new(ids.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")?
            .progress_chars("=>-"),
    );

    let outcomes = process_all(driver, ids, config.batch.jobs, &progress).await?;
    progress.finish_and_clear();

    let report = BatchReport::from_outcomes(outcomes);

    if config.output.write_artifacts {
        for doc in &report.documents {
            let path = config
                .input
                .output_base
                .join(&doc.file_folder)
                .join(&config.output.artifact_file);
            if let Err(e) = write_artifact(&path, doc) {
                warn!("Artifact for {} not written: {:#}", doc.file_folder, e);
                println!(
                    "{} Artifact for {} not written: {:#}",
                    style("⚠").yellow(),
                    doc.file_folder,
                    e
                );
            }
        }
    }

    if report.is_empty() {
        warn!("No records were produced");
        println!("{} No records were produced", style("⚠").yellow());
    } else {
        let results_path = config.results_path();
        write_results(&results_path, &report.documents)?;
        println!(
            "{} Results written to {}",
            style("✓").green(),
            results_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        report.documents.len() + report.skipped.len(),
        start.elapsed()
    );
    println!(
        "   {} parsed, {} skipped",
        style(report.documents.len()).green(),
        style(report.skipped.len()).yellow()
    );

    if !report.skipped.is_empty() {
        println!();
        println!("{}", style("Skipped documents:").yellow());
        for entry in &report.skipped {
            println!("  - {}: {}", entry.id, entry.reason);
        }
    }

    Ok(())
}

/// Run the driver over `ids` on blocking workers, at most `jobs` at a time.
/// Outcomes come back in the order of `ids`.
async fn process_all(
    driver: Arc<BatchDriver<FsTextStore>>,
    ids: Vec<String>,
    jobs: usize,
    progress: &ProgressBar,
) -> anyhow::Result<Vec<EntryOutcome>> {
    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut handles = Vec::with_capacity(ids.len());

    for id in ids {
        let permit = semaphore.clone().acquire_owned().await?;
        let driver = driver.clone();
        let worker_id = id.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            driver.process(&worker_id)
        });
        handles.push((id, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (id, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Worker for {} failed: {}", id, e);
                EntryOutcome::Skipped(SkippedEntry {
                    id,
                    reason: format!("worker failed: {}", e),
                })
            }
        };
        progress.inc(1);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

fn write_artifact(path: &Path, doc: &ParsedDocument) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Wrote artifact to {}", path.display());
    Ok(())
}

/// Write the results table; the file extension picks the format.
fn write_results(path: &Path, documents: &[ParsedDocument]) -> anyhow::Result<()> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));

    if is_xlsx {
        write_results_xlsx(path, documents)
    } else {
        write_results_csv(path, documents)
    }
}

fn write_results_csv(path: &Path, documents: &[ParsedDocument]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record(TABLE_COLUMNS)?;
    for doc in documents {
        wtr.write_record(doc.table_row())?;
    }

    wtr.flush()?;
    Ok(())
}

const AMOUNT_COLUMN: u16 = 5;
const CONFIDENCE_COLUMN: u16 = 8;

fn write_results_xlsx(path: &Path, documents: &[ParsedDocument]) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in TABLE_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (idx, doc) in documents.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, cell) in doc.table_row().iter().enumerate() {
            let col = col as u16;
            let number = match col {
                AMOUNT_COLUMN => doc.fields.amount,
                CONFIDENCE_COLUMN => doc.fields.avg_confidence,
                _ => None,
            };
            match number {
                Some(value) => {
                    sheet.write_number(row, col, value)?;
                }
                None if !cell.is_empty() => {
                    sheet.write_string(row, col, cell)?;
                }
                None => {}
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontrakt_core::FieldRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_results_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let docs = vec![ParsedDocument {
            file_folder: "scan_001".to_string(),
            fields: FieldRecord {
                contract_number: Some("123-AB".to_string()),
                counterparty: Some("ООО \"Ромашка\"".to_string()),
                amount: Some(1500000.0),
                ..Default::default()
            },
            raw_text_preview: String::new(),
        }];

        write_results(&path, &docs).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines[0],
            "file_folder,contract_number,date_start,date_end,counterparty,amount,currency,payment_currency,avg_confidence"
        );
        assert_eq!(lines[1], "scan_001,123-AB,,,\"ООО \"\"Ромашка\"\"\",1500000,,,");
    }

    #[test]
    fn test_write_results_xlsx_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.xlsx");
        let docs = vec![ParsedDocument {
            file_folder: "scan_002".to_string(),
            fields: FieldRecord {
                amount: Some(45000.0),
                currency: Some("тенге".to_string()),
                avg_confidence: Some(0.93),
                ..Default::default()
            },
            raw_text_preview: String::new(),
        }];

        write_results(&path, &docs).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_process_all_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        for id in ["a", "b", "c", "d"] {
            fs::create_dir(dir.path().join(id)).unwrap();
            fs::write(
                dir.path().join(id).join("result.txt"),
                format!("Договор № {}-100", id.to_uppercase()),
            )
            .unwrap();
        }
        let store = FsTextStore::new(dir.path(), vec!["result.txt".to_string()]);
        let driver = Arc::new(BatchDriver::new(store, RecordBuilder::new()));
        let ids = driver.entries().unwrap();

        let outcomes = process_all(driver, ids, 2, &ProgressBar::hidden()).await.unwrap();
        let numbers: Vec<_> = outcomes
            .iter()
            .map(|o| match o {
                EntryOutcome::Parsed(doc) => doc.fields.contract_number.clone().unwrap(),
                EntryOutcome::Skipped(s) => panic!("skipped {}", s.id),
            })
            .collect();
        assert_eq!(numbers, vec!["A-100", "B-100", "C-100", "D-100"]);
    }
}
