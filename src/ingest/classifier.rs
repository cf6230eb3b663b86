use serde::Serialize;
use std::path::Path;
use crate::config::IngestConfig;
use crate::constants::*;
use crate::error::{IngestError, IngestResult};
use crate::ingest::header::HeaderValidation;
use crate::ingest::record::RawAdmissionRow;
use crate::ingest::tokenizer::parse_csv_line;

/// One non-blank line of the document with its physical (1-based) line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub line_number: usize,
    pub text: &'a str,
}

/// Splits a document into its header line and data lines.
///
/// Whitespace-only lines are dropped but physical numbering is kept, so
/// reported line numbers point at the file as the user sees it. A leading
/// byte-order mark is dropped. Returns `None` when the document has no header.
pub fn split_document(text: &str) -> Option<(SourceLine<'_>, Vec<SourceLine<'_>>)> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| SourceLine {
            line_number: index + 1,
            text: line,
        });

    let header = lines.next()?;
    Some((header, lines.collect()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InvalidReason {
    FieldCount { expected: usize, found: usize },
    MissingRequiredField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClass {
    Valid(RawAdmissionRow),
    Empty,
    Invalid(InvalidReason),
}

/// Classifies one data line against the validated header.
pub fn classify_line(line: &str, headers: &[String]) -> RowClass {
    let values = parse_csv_line(line);

    if values.len() != headers.len() {
        return RowClass::Invalid(InvalidReason::FieldCount {
            expected: headers.len(),
            found: values.len(),
        });
    }

    if values.iter().all(|value| value.trim().is_empty()) {
        return RowClass::Empty;
    }

    let row = RawAdmissionRow::from_fields(headers, values);
    if REQUIRED_ROW_FIELDS.iter().all(|column| !row.get(column).is_empty()) {
        RowClass::Valid(row)
    } else {
        RowClass::Invalid(InvalidReason::MissingRequiredField)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRow {
    pub college: String,
    pub course: String,
    pub category: String,
    pub opening_rank: String,
    pub closing_rank: String,
}

impl PreviewRow {
    fn from_row(row: &RawAdmissionRow) -> Self {
        Self {
            college: row.get(COLUMN_COLLEGE).to_string(),
            course: row.get(COLUMN_COURSE).to_string(),
            category: row.get(COLUMN_SEAT_TYPE).to_string(),
            opening_rank: row.get(COLUMN_OPENING_RANK).to_string(),
            closing_rank: row.get(COLUMN_CLOSING_RANK).to_string(),
        }
    }
}

/// User-facing report on the structure of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub header: HeaderValidation,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub empty_rows: usize,
    pub invalid_rows: Vec<usize>,
    pub preview: Vec<PreviewRow>,
    #[serde(skip)]
    preview_limit: usize,
}

impl ValidationReport {
    pub fn new(header: HeaderValidation, preview_limit: usize) -> Self {
        Self {
            header,
            total_rows: 0,
            valid_rows: 0,
            empty_rows: 0,
            invalid_rows: Vec::new(),
            preview: Vec::new(),
            preview_limit,
        }
    }

    pub fn record(&mut self, line_number: usize, class: &RowClass) {
        self.total_rows += 1;
        match class {
            RowClass::Valid(row) => {
                self.valid_rows += 1;
                if self.preview.len() < self.preview_limit {
                    self.preview.push(PreviewRow::from_row(row));
                }
            }
            RowClass::Empty => self.empty_rows += 1,
            RowClass::Invalid(_) => self.invalid_rows.push(line_number),
        }
    }

    pub fn header_mismatch(&self) -> bool {
        self.header.header_mismatch
    }

    /// The error a full ingestion run would reject this document with, if any.
    pub fn rejection(&self, reject_invalid_rows: bool) -> Option<IngestError> {
        if self.header_mismatch() {
            return Some(IngestError::Structural {
                missing: self.header.missing_headers.clone(),
                extra: self.header.extra_headers.clone(),
            });
        }

        if self.valid_rows == 0 {
            return Some(IngestError::NoValidRows {
                total: self.total_rows,
            });
        }

        if reject_invalid_rows && !self.invalid_rows.is_empty() {
            return Some(IngestError::InvalidRows {
                lines: self.invalid_rows.clone(),
            });
        }

        None
    }

    /// Plain-text lines describing everything a curator should look at.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Total rows: {} ({} valid)",
            self.total_rows, self.valid_rows
        )];

        if !self.header.missing_headers.is_empty() {
            lines.push(format!(
                "Missing required columns: {}",
                self.header.missing_headers.join(", ")
            ));
        }
        if !self.header.extra_headers.is_empty() {
            lines.push(format!(
                "Unexpected columns: {}",
                self.header.extra_headers.join(", ")
            ));
        }
        if !self.invalid_rows.is_empty() {
            let numbers: Vec<String> = self.invalid_rows.iter().map(|n| n.to_string()).collect();
            lines.push(format!("Invalid rows: {}", numbers.join(", ")));
        }
        if self.empty_rows > 0 {
            lines.push(format!("Empty rows found: {} (will be skipped)", self.empty_rows));
        }

        lines
    }
}

/// Runs header validation and row classification over a whole document
/// without inferring or merging anything. A header mismatch still yields a
/// full report.
pub fn validate_csv(text: &str, config: &IngestConfig) -> IngestResult<ValidationReport> {
    let (header_line, data_lines) = split_document(text).ok_or(IngestError::NoDataRows)?;
    let headers = parse_csv_line(header_line.text);
    let header = HeaderValidation::validate(&headers, config.allow_extra_headers);
    let mut report = ValidationReport::new(header, config.preview_rows);

    for line in &data_lines {
        let class = classify_line(line.text, &headers);
        report.record(line.line_number, &class);
    }

    Ok(report)
}

/// Reads `path` as UTF-8 text.
pub async fn read_document(path: &Path) -> IngestResult<String> {
    let bytes = tokio::fs::read(path).await.map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|e| IngestError::Decode {
        path: path.to_path_buf(),
        message: e.utf8_error().to_string(),
    })
}

pub async fn validate_file(path: &Path, config: &IngestConfig) -> IngestResult<ValidationReport> {
    let text = read_document(path).await?;
    validate_csv(&text, config)
}
