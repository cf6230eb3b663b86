// Ingestion pipeline: tokenize, validate, classify, infer, merge
pub mod ingest;

pub mod config;
pub mod constants;
pub mod error;
pub mod snapshot;
pub mod utils;

// Re-export main types for convenience
pub use config::Config;
pub use error::{IngestError, IngestResult};
pub use ingest::{
    ingest_csv, ingest_directory, validate_csv, Dataset, IngestPhase, IngestProcessor,
    IngestProgress, IngestReport, IngestSummary, ValidationReport,
};
pub use snapshot::SnapshotStore;
