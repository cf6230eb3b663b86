use anyhow::Result;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{IngestError, IngestResult};
use crate::ingest::classifier::{
    classify_line, read_document, split_document, RowClass, ValidationReport,
};
use crate::ingest::header::HeaderValidation;
use crate::ingest::inference::infer_row;
use crate::ingest::merge::MergeEngine;
use crate::ingest::progress::{IngestPhase, IngestProgress, IngestSummary};
use crate::ingest::record::Dataset;
use crate::ingest::tokenizer::parse_csv_line;

/// Finalized result of a completed run, ready to hand to storage.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub dataset: Dataset,
    pub summary: IngestSummary,
    pub validation: ValidationReport,
}

/// Drives one ingestion run: header validation, chunked row processing,
/// finalization.
///
/// Nothing is written anywhere; a run either returns the complete merged
/// dataset or an error, never a partial result.
pub struct IngestProcessor {
    config: Config,
    phase: IngestPhase,
    progress_tx: Option<UnboundedSender<IngestProgress>>,
    shutdown_flag: Arc<AtomicBool>,
}

impl IngestProcessor {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            phase: IngestPhase::Idle,
            progress_tx: None,
            shutdown_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn with_progress_channel(mut self, progress_tx: UnboundedSender<IngestProgress>) -> Self {
        self.progress_tx = Some(progress_tx);
        self
    }

    pub fn with_shutdown_signal(mut self, shutdown_flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = shutdown_flag;
        self
    }

    pub fn phase(&self) -> &IngestPhase {
        &self.phase
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads and decodes `path`, then ingests it. Read or decode failures end
    /// the run in `Failed`.
    pub async fn process_file(&mut self, path: &Path, existing: Dataset) -> IngestResult<IngestReport> {
        self.phase = IngestPhase::Idle;

        let text = match read_document(path).await {
            Ok(text) => text,
            Err(e) => return Err(self.fail(e)),
        };

        info!("Ingesting {}", path.display());
        self.process_text(&text, existing).await
    }

    pub async fn process_text(&mut self, text: &str, existing: Dataset) -> IngestResult<IngestReport> {
        let start_time = Instant::now();
        let ingest = self.config.ingest.clone();

        self.phase = IngestPhase::HeaderValidating;
        let (header_line, data_lines) = match split_document(text) {
            Some((header_line, data_lines)) if !data_lines.is_empty() => (header_line, data_lines),
            _ => return Err(self.reject(IngestError::NoDataRows)),
        };

        let headers = parse_csv_line(header_line.text);
        let header = HeaderValidation::validate(&headers, ingest.allow_extra_headers);
        if header.header_mismatch {
            return Err(self.reject(IngestError::Structural {
                missing: header.missing_headers,
                extra: header.extra_headers,
            }));
        }

        self.phase = IngestPhase::RowProcessing;
        let mut validation = ValidationReport::new(header, ingest.preview_rows);
        let mut engine = MergeEngine::new(existing);
        let total_lines = data_lines.len();
        let chunk_count = total_lines.div_ceil(ingest.chunk_size_lines);
        let mut processed_lines = 0;

        debug!(
            "Processing {} data lines in {} chunks of {}",
            total_lines, chunk_count, ingest.chunk_size_lines
        );

        for (chunk_index, chunk) in data_lines.chunks(ingest.chunk_size_lines).enumerate() {
            if self.shutdown_requested() {
                warn!("Cancellation requested at line {}/{}", processed_lines, total_lines);
                self.phase = IngestPhase::Cancelled;
                return Err(IngestError::Cancelled {
                    processed: processed_lines,
                    total: total_lines,
                });
            }

            for line in chunk {
                let class = classify_line(line.text, &headers);
                validation.record(line.line_number, &class);

                if let RowClass::Valid(row) = class {
                    engine.merge(infer_row(&row, &self.config.defaults));
                }
            }

            processed_lines += chunk.len();
            self.report_progress(IngestProgress {
                processed_lines,
                total_lines,
                chunk_index,
                chunk_count,
            });

            tokio::task::yield_now().await;
        }

        if let Some(error) = validation.rejection(ingest.reject_invalid_rows) {
            return Err(self.reject(error));
        }

        if !validation.invalid_rows.is_empty() {
            warn!(
                "Skipped {} invalid rows (lines {:?})",
                validation.invalid_rows.len(),
                validation.invalid_rows
            );
        }

        self.phase = IngestPhase::Finalizing;
        let (dataset, stats) = engine.finish();
        let summary = IngestSummary {
            new_records_added: stats.new_records_added,
            duplicates_skipped: stats.duplicates_skipped,
            total_records: dataset.colleges.len(),
            valid_rows: validation.valid_rows,
            invalid_rows: validation.invalid_rows.len(),
            empty_rows: validation.empty_rows,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        self.phase = IngestPhase::Complete;
        info!("{}", summary);

        Ok(IngestReport {
            dataset,
            summary,
            validation,
        })
    }

    fn report_progress(&self, progress: IngestProgress) {
        debug!(
            "Chunk {}/{}: {} of {} lines ({:.0}%)",
            progress.chunk_index + 1,
            progress.chunk_count,
            progress.processed_lines,
            progress.total_lines,
            progress.percentage()
        );

        if let Some(progress_tx) = &self.progress_tx {
            // A dropped receiver only means nobody is watching.
            let _ = progress_tx.send(progress);
        }
    }

    fn reject(&mut self, error: IngestError) -> IngestError {
        warn!("Ingestion rejected: {}", error);
        self.phase = IngestPhase::Rejected(error.to_string());
        error
    }

    fn fail(&mut self, error: IngestError) -> IngestError {
        warn!("Ingestion failed: {}", error);
        self.phase = IngestPhase::Failed(error.to_string());
        error
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown_flag.load(Ordering::Relaxed)
    }
}
