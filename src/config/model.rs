use serde::{Deserialize, Serialize};
use crate::constants::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ingest: IngestConfig,
    pub defaults: FieldDefaults,
    pub io: IoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub chunk_size_lines: usize,
    pub preview_rows: usize,
    pub allow_extra_headers: bool,
    pub reject_invalid_rows: bool,
}

/// Values substituted when an optional column is blank in a data row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub year: String,
    pub quota: String,
    pub gender: String,
    pub category: String,
    pub round: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub snapshot_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbosity: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size_lines: DEFAULT_CHUNK_SIZE_LINES,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            allow_extra_headers: false,
            reject_invalid_rows: false,
        }
    }
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR.to_string(),
            quota: DEFAULT_QUOTA.to_string(),
            gender: DEFAULT_GENDER.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            round: DEFAULT_ROUND_NUMBER.to_string(),
        }
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            snapshot_path: DEFAULT_SNAPSHOT_PATH.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: "normal".to_string(),
        }
    }
}
