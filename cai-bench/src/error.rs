use std::fmt;

/// Errors raised while turning an input file into benchmark observations.
///
/// - `Parse`: the file could not be read as tabular data. Callers fall back
///   to the built-in sample dataset.
/// - `Schema`: the table parsed but required columns are missing. Nothing
///   downstream may run.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestError {
    Parse(String),
    Schema {
        missing: Vec<String>,
        detected: Vec<String>,
    },
}

impl IngestError {
    pub fn parse(cause: impl fmt::Display) -> Self {
        IngestError::Parse(cause.to_string())
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, IngestError::Schema { .. })
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Parse(cause) => write!(f, "Error: {}", cause),
            IngestError::Schema { missing, detected } => write!(
                f,
                "Missing columns: {}\nDetected columns: {}",
                missing.join(", "),
                detected.join(", ")
            ),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<csv::Error> for IngestError {
    fn from(e: csv::Error) -> Self {
        IngestError::parse(e)
    }
}

impl From<std::io::Error> for IngestError {
    fn from(e: std::io::Error) -> Self {
        IngestError::parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::IngestError;

    #[test]
    fn schema_error_lists_missing_then_detected() {
        let err = IngestError::Schema {
            missing: vec!["CO2".to_string()],
            detected: vec!["Models".to_string(), "Size".to_string()],
        };
        let message = err.to_string();
        assert_eq!(message.lines().next(), Some("Missing columns: CO2"));
        assert_eq!(message.lines().nth(1), Some("Detected columns: Models, Size"));
        assert!(err.is_schema());
    }

    #[test]
    fn parse_error_keeps_cause() {
        let err = IngestError::parse("unexpected end of file");
        assert_eq!(err.to_string(), "Error: unexpected end of file");
        assert!(!err.is_schema());
    }
}
