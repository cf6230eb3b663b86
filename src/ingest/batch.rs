use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::IngestError;
use crate::ingest::processor::IngestProcessor;
use crate::ingest::progress::IngestSummary;
use crate::ingest::record::Dataset;
use crate::utils::discover_csv_files;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FileOutcome {
    Ingested { path: PathBuf, summary: IngestSummary },
    Rejected { path: PathBuf, reason: String },
    Failed { path: PathBuf, reason: String },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Ingested { path, .. }
            | FileOutcome::Rejected { path, .. }
            | FileOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_ingested(&self) -> bool {
        matches!(self, FileOutcome::Ingested { .. })
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub dataset: Dataset,
    pub files: Vec<FileOutcome>,
    pub cancelled: bool,
}

impl BatchReport {
    pub fn new_records_added(&self) -> usize {
        self.files
            .iter()
            .map(|outcome| match outcome {
                FileOutcome::Ingested { summary, .. } => summary.new_records_added,
                _ => 0,
            })
            .sum()
    }

    pub fn files_ingested(&self) -> usize {
        self.files.iter().filter(|outcome| outcome.is_ingested()).count()
    }
}

/// Ingests every CSV file under `directory` one after another against a single
/// accumulating dataset.
///
/// A rejected or unreadable file leaves the dataset as it was and the batch
/// moves on. Cancellation stops the batch and keeps what earlier files added.
pub async fn ingest_directory(
    processor: &mut IngestProcessor,
    directory: &Path,
    existing: Dataset,
) -> Result<BatchReport> {
    let csv_files = discover_csv_files(directory)?;
    if csv_files.is_empty() {
        anyhow::bail!("No CSV files found in: {}", directory.display());
    }

    info!("Found {} CSV files in {}", csv_files.len(), directory.display());

    let mut dataset = existing;
    let mut files = Vec::with_capacity(csv_files.len());
    let mut cancelled = false;

    for path in csv_files {
        match processor.process_file(&path, dataset.clone()).await {
            Ok(report) => {
                dataset = report.dataset;
                files.push(FileOutcome::Ingested {
                    path,
                    summary: report.summary,
                });
            }
            Err(IngestError::Cancelled { .. }) => {
                warn!("Batch cancelled before {}", path.display());
                cancelled = true;
                break;
            }
            Err(e) if e.is_rejection() => {
                files.push(FileOutcome::Rejected {
                    path,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                files.push(FileOutcome::Failed {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(BatchReport {
        dataset,
        files,
        cancelled,
    })
}
