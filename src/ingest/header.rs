use serde::Serialize;
use tracing::warn;
use crate::constants::EXPECTED_HEADERS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderValidation {
    pub headers: Vec<String>,
    pub missing_headers: Vec<String>,
    pub extra_headers: Vec<String>,
    pub header_mismatch: bool,
}

impl HeaderValidation {
    /// Compares a tokenized header row against the fixed export schema.
    ///
    /// Missing columns keep the schema's order, extra columns keep the input's.
    /// Column order itself is irrelevant. With `allow_extra_headers`, unknown
    /// columns are reported but do not count as a mismatch.
    pub fn validate(headers: &[String], allow_extra_headers: bool) -> Self {
        let missing_headers: Vec<String> = EXPECTED_HEADERS
            .iter()
            .filter(|expected| !headers.iter().any(|header| header == *expected))
            .map(|expected| expected.to_string())
            .collect();

        let extra_headers: Vec<String> = headers
            .iter()
            .filter(|header| !EXPECTED_HEADERS.contains(&header.as_str()))
            .cloned()
            .collect();

        if !extra_headers.is_empty() {
            warn!("Unexpected columns will be ignored: {}", extra_headers.join(", "));
        }

        let header_mismatch =
            !missing_headers.is_empty() || (!extra_headers.is_empty() && !allow_extra_headers);

        Self {
            headers: headers.to_vec(),
            missing_headers,
            extra_headers,
            header_mismatch,
        }
    }

    pub fn field_count(&self) -> usize {
        self.headers.len()
    }
}
