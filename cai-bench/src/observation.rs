use crate::{error::IngestError, schema::ColumnIndex};
use csv::StringRecord;
use serde::Serialize;
use std::{fmt, str::FromStr};

/// Model size class.
///
/// Ordering follows the declaration order (Small < Medium < Large) and is
/// the natural iteration order for grouped output.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    /// Stable integer key used when sizes are stored in the session database.
    pub fn rank(self) -> i64 {
        match self {
            Size::Small => 0,
            Size::Medium => 1,
            Size::Large => 2,
        }
    }

    pub fn from_rank(rank: i64) -> Option<Size> {
        match rank {
            0 => Some(Size::Small),
            1 => Some(Size::Medium),
            2 => Some(Size::Large),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            other => Err(IngestError::Parse(format!("unknown model size '{}'", other))),
        }
    }
}

/// Cell contents read as a missing measurement rather than a number.
pub const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One benchmark measurement: a model answering a single question.
///
/// Measurements are `None` when the cell was blank or held a missing-value
/// marker such as `NaN`. Group means and totals skip them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub model: String,
    pub size: Size,
    pub question: i64,
    /// Answer quality on a 0-5 scale.
    pub quality: Option<f64>,
    /// Response latency in seconds.
    pub latency: Option<f64>,
    /// Emissions in kg CO2.
    pub co2: Option<f64>,
    /// Energy consumption in kWh.
    pub energy: Option<f64>,
    pub category: String,
}

impl Observation {
    /// Build an observation from a data row using the resolved column layout.
    ///
    /// `line` is only used to make error messages point at the offending row.
    pub fn from_record(
        record: &StringRecord,
        columns: &ColumnIndex,
        line: u64,
    ) -> Result<Observation, IngestError> {
        let field = |idx: usize, name: &str| {
            record.get(idx).ok_or_else(|| {
                IngestError::Parse(format!("line {}: no value for column '{}'", line, name))
            })
        };
        let real = |idx: usize, name: &str| -> Result<Option<f64>, IngestError> {
            let raw = field(idx, name)?.trim();
            parse_measurement(raw).map_err(|_| {
                IngestError::Parse(format!(
                    "line {}: could not convert '{}' in column '{}' to a number",
                    line, raw, name
                ))
            })
        };

        let size = field(columns.size, "Size")?
            .parse::<Size>()
            .map_err(|e| match e {
                IngestError::Parse(cause) => IngestError::Parse(format!("line {}: {}", line, cause)),
                other => other,
            })?;

        Ok(Observation {
            model: field(columns.model, "Models")?.to_string(),
            size,
            question: parse_question(field(columns.question, "Question")?, line)?,
            quality: real(columns.quality, "Quality")?,
            latency: real(columns.latency, "Latency")?,
            co2: real(columns.co2, "CO2")?,
            energy: real(columns.energy, "Energy")?,
            category: field(columns.category, "Questions class")?.to_string(),
        })
    }
}

/// A numeric cell, or `None` for a missing-value marker. `NaN` in any
/// spelling is missing.
fn parse_measurement(raw: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    if MISSING_MARKERS.contains(&raw) {
        return Ok(None);
    }
    let value = raw.parse::<f64>()?;
    Ok(if value.is_nan() { None } else { Some(value) })
}

/// Question ids are integers, but spreadsheet exports often write them as
/// `3.0`; accept those as long as there is no fractional part.
fn parse_question(raw: &str, line: u64) -> Result<i64, IngestError> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(id);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(IngestError::Parse(format!(
            "line {}: question id '{}' is not an integer",
            line, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{normalize_headers, ColumnIndex};

    fn columns() -> ColumnIndex {
        let headers = normalize_headers(
            "Models,Size,Question,Quality,Latency,CO2,Energy,Questions class".split(','),
        );
        ColumnIndex::resolve(&headers).unwrap()
    }

    #[test]
    fn parses_full_row() {
        let record = StringRecord::from(vec![
            "Mistral 7B", "Medium", "4", "4.5", "2.25", "0.10", "0.2", "Reasoning",
        ]);
        let obs = Observation::from_record(&record, &columns(), 2).unwrap();
        assert_eq!(obs.model, "Mistral 7B");
        assert_eq!(obs.size, Size::Medium);
        assert_eq!(obs.question, 4);
        assert_eq!(obs.quality, Some(4.5));
        assert_eq!(obs.energy, Some(0.2));
        assert_eq!(obs.category, "Reasoning");
    }

    #[test]
    fn size_parsing_is_case_insensitive() {
        assert_eq!(" large ".parse::<Size>().unwrap(), Size::Large);
        assert_eq!("SMALL".parse::<Size>().unwrap(), Size::Small);
        assert!("tiny".parse::<Size>().is_err());
    }

    #[test]
    fn size_ordering_and_rank_agree() {
        let mut sizes = vec![Size::Large, Size::Small, Size::Medium];
        sizes.sort();
        assert_eq!(sizes, vec![Size::Small, Size::Medium, Size::Large]);
        for size in sizes {
            assert_eq!(Size::from_rank(size.rank()), Some(size));
        }
        assert_eq!(Size::from_rank(7), None);
    }

    #[test]
    fn float_question_ids_are_accepted() {
        assert_eq!(parse_question("3.0", 1).unwrap(), 3);
        assert!(parse_question("3.5", 1).is_err());
        assert!(parse_question("three", 1).is_err());
    }

    #[test]
    fn non_numeric_quality_is_a_parse_error() {
        let record = StringRecord::from(vec![
            "A", "Small", "1", "great", "1", "0.1", "0.2", "Easy",
        ]);
        let err = Observation::from_record(&record, &columns(), 5).unwrap_err();
        assert!(matches!(err, IngestError::Parse(ref m) if m.contains("line 5") && m.contains("Quality")));
    }

    #[test]
    fn blank_and_nan_cells_are_missing() {
        let record = StringRecord::from(vec![
            "A", "Small", "1", "5", "", "NaN", " nan ", "Easy",
        ]);
        let obs = Observation::from_record(&record, &columns(), 3).unwrap();
        assert_eq!(obs.quality, Some(5.0));
        assert_eq!(obs.latency, None);
        assert_eq!(obs.co2, None);
        assert_eq!(obs.energy, None);
    }

    #[test]
    fn missing_markers_and_numbers() {
        assert_eq!(parse_measurement("N/A").unwrap(), None);
        assert_eq!(parse_measurement("NAN").unwrap(), None);
        assert_eq!(parse_measurement("0.25").unwrap(), Some(0.25));
        assert!(parse_measurement("fast").is_err());
    }
}
