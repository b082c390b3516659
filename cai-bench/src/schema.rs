//! Required column layout for benchmark datasets.
//!
//! Column names are matched exactly after trimming surrounding whitespace.
//! Extra columns are allowed and ignored; column order does not matter.

use crate::error::IngestError;

pub const MODELS: &str = "Models";
pub const SIZE: &str = "Size";
pub const QUESTION: &str = "Question";
pub const QUALITY: &str = "Quality";
pub const LATENCY: &str = "Latency";
pub const CO2: &str = "CO2";
pub const ENERGY: &str = "Energy";
pub const CATEGORY: &str = "Questions class";

/// Every column a dataset must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 8] =
    [MODELS, SIZE, QUESTION, QUALITY, LATENCY, CO2, ENERGY, CATEGORY];

/// Position of each required column within a parsed header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub model: usize,
    pub size: usize,
    pub question: usize,
    pub quality: usize,
    pub latency: usize,
    pub co2: usize,
    pub energy: usize,
    pub category: usize,
}

/// Trim header names the way they are compared against [`REQUIRED_COLUMNS`].
pub fn normalize_headers<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    headers.into_iter().map(|h| h.trim().to_string()).collect()
}

/// Required columns absent from `headers`, in [`REQUIRED_COLUMNS`] order.
pub fn missing_columns(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|s| s.to_string())
        .collect()
}

impl ColumnIndex {
    /// Locate every required column, or report which are missing alongside
    /// the columns that were actually detected.
    pub fn resolve(headers: &[String]) -> Result<ColumnIndex, IngestError> {
        let missing = missing_columns(headers);
        if !missing.is_empty() {
            log::warn!("schema: missing columns {:?}", missing);
            return Err(IngestError::Schema {
                missing,
                detected: headers.to_vec(),
            });
        }
        // First occurrence wins when a header is duplicated.
        let position = |name: &str| headers.iter().position(|h| h == name).unwrap_or_default();
        Ok(ColumnIndex {
            model: position(MODELS),
            size: position(SIZE),
            question: position(QUESTION),
            quality: position(QUALITY),
            latency: position(LATENCY),
            co2: position(CO2),
            energy: position(ENERGY),
            category: position(CATEGORY),
        })
    }
}
