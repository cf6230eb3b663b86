pub mod batch;
pub mod classifier;
pub mod header;
pub mod inference;
pub mod merge;
pub mod processor;
pub mod progress;
pub mod record;
pub mod tokenizer;


pub use batch::{ingest_directory, BatchReport, FileOutcome};
pub use classifier::{validate_csv, validate_file, ValidationReport};
pub use processor::{IngestProcessor, IngestReport};
pub use progress::{IngestPhase, IngestProgress, IngestSummary};
pub use record::{AdmissionRecord, Category, Dataset, Institute, Program, Round};

use anyhow::Result;
use crate::config::Config;

pub async fn ingest_csv(text: &str, existing: Dataset, config: Config) -> Result<IngestReport> {
    let mut processor = IngestProcessor::new(config)?;
    Ok(processor.process_text(text, existing).await?)
}
