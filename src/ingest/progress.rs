use serde::Serialize;
use std::fmt;
use crate::constants::PERCENT_100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IngestPhase {
    Idle,
    HeaderValidating,
    RowProcessing,
    Finalizing,
    Complete,
    Rejected(String),
    Failed(String),
    Cancelled,
}

impl IngestPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            IngestPhase::Complete
                | IngestPhase::Rejected(_)
                | IngestPhase::Failed(_)
                | IngestPhase::Cancelled
        )
    }
}

/// Emitted after every processed chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestProgress {
    pub processed_lines: usize,
    pub total_lines: usize,
    pub chunk_index: usize,
    pub chunk_count: usize,
}

impl IngestProgress {
    pub fn percentage(&self) -> f64 {
        if self.total_lines == 0 {
            return PERCENT_100;
        }
        self.processed_lines as f64 / self.total_lines as f64 * PERCENT_100
    }

    /// Whole percent, as shown on a progress bar.
    pub fn rounded_percentage(&self) -> u8 {
        self.percentage().round().min(PERCENT_100) as u8
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub new_records_added: usize,
    pub duplicates_skipped: usize,
    pub total_records: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub empty_rows: usize,
    pub processing_time_ms: u64,
}

impl fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} new records added.", self.new_records_added)?;
        if self.duplicates_skipped > 0 {
            write!(f, " {} duplicates skipped.", self.duplicates_skipped)?;
        }
        write!(f, " Total records: {}", self.total_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percentage() {
        let progress = IngestProgress {
            processed_lines: 150,
            total_lines: 400,
            chunk_index: 1,
            chunk_count: 4,
        };
        assert_eq!(progress.percentage(), 37.5);
        assert_eq!(progress.rounded_percentage(), 38);
    }

    #[test]
    fn test_summary_message() {
        let mut summary = IngestSummary {
            new_records_added: 2,
            total_records: 2,
            ..Default::default()
        };
        assert_eq!(summary.to_string(), "2 new records added. Total records: 2");

        summary.duplicates_skipped = 3;
        assert_eq!(
            summary.to_string(),
            "2 new records added. 3 duplicates skipped. Total records: 2"
        );
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!IngestPhase::RowProcessing.is_terminal());
        assert!(IngestPhase::Rejected("bad header".to_string()).is_terminal());
        assert!(IngestPhase::Cancelled.is_terminal());
    }
}
