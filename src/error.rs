use std::path::PathBuf;
use thiserror::Error;

/// Run-level failures of an ingestion pass.
///
/// Row-level problems never show up here; they are reported per line in the
/// validation report and the run carries on without them.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Header mismatch: missing columns [{}], unexpected columns [{}]", missing.join(", "), extra.join(", "))]
    Structural { missing: Vec<String>, extra: Vec<String> },

    #[error("CSV input must contain a header row and at least one data row")]
    NoDataRows,

    #[error("No usable rows found in {total} data lines")]
    NoValidRows { total: usize },

    #[error("Invalid rows on lines: {}", format_line_numbers(lines))]
    InvalidRows { lines: Vec<usize> },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {} as UTF-8: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Ingestion cancelled after {processed} of {total} lines; nothing was committed")]
    Cancelled { processed: usize, total: usize },
}

impl IngestError {
    /// Structural and file-level errors are fixed by re-uploading a corrected file.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            IngestError::Structural { .. }
                | IngestError::NoDataRows
                | IngestError::NoValidRows { .. }
                | IngestError::InvalidRows { .. }
        )
    }
}

fn format_line_numbers(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type IngestResult<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_message_lists_columns() {
        let error = IngestError::Structural {
            missing: vec!["Closing Rank".to_string()],
            extra: vec!["Notes".to_string(), "Remarks".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Header mismatch: missing columns [Closing Rank], unexpected columns [Notes, Remarks]"
        );
        assert!(error.is_rejection());
    }

    #[test]
    fn test_invalid_rows_message() {
        let error = IngestError::InvalidRows { lines: vec![3, 7] };
        assert_eq!(error.to_string(), "Invalid rows on lines: 3, 7");
    }

    #[test]
    fn test_decode_is_not_a_rejection() {
        let error = IngestError::Decode {
            path: PathBuf::from("cutoffs.csv"),
            message: "invalid utf-8 sequence".to_string(),
        };
        assert!(!error.is_rejection());
        assert!(error.to_string().contains("cutoffs.csv"));
    }
}
