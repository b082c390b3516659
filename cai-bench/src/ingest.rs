//! Reading benchmark tables from delimited text.
//!
//! Ingestion runs in three steps, and the first failure stops it:
//! 1. parse the bytes as a delimited table (comma, or tab for `.tsv`),
//!    transparently gunzipping `*.gz` files;
//! 2. trim header names and check the required columns
//!    ([`crate::schema::REQUIRED_COLUMNS`]);
//! 3. convert every row into an [`Observation`].
//!
//! Failures in steps 1 and 3 are [`IngestError::Parse`]; step 2 yields
//! [`IngestError::Schema`]. [`load_or_sample`] turns a parse failure into a
//! fallback to the built-in sample dataset, while a schema failure is
//! returned to the caller untouched.

use crate::{
    error::IngestError,
    observation::Observation,
    sample,
    schema::{normalize_headers, ColumnIndex},
};
use csv::{ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use serde::Serialize;
use std::{io::Read, path::Path};

/// Where the session's dataset came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// A user supplied file that parsed successfully.
    File { path: String },
    /// The built-in sample table.
    Sample,
    /// The built-in sample table, used because the supplied file failed to parse.
    Fallback { path: String, cause: String },
}

/// A validated table of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Header names as detected (trimmed), including non-required extras.
    pub columns: Vec<String>,
    /// Rows in input order.
    pub observations: Vec<Observation>,
    pub source: DataSource,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Field delimiter implied by a file name.
pub fn delimiter_for(path: &str) -> u8 {
    let lowered = path.to_lowercase();
    let stem = lowered.strip_suffix(".gz").unwrap_or(&lowered);
    if stem.ends_with(".tsv") || stem.ends_with(".tab") {
        b'\t'
    } else {
        b','
    }
}

/// Parse a delimited table held in memory.
pub fn read_str(data: &str, delimiter: u8) -> Result<(Vec<String>, Vec<Observation>), IngestError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(data.as_bytes());

    let columns = normalize_headers(rdr.headers()?.iter());
    if columns.iter().all(|c| c.is_empty()) {
        return Err(IngestError::parse("No columns to parse from file"));
    }
    let index = ColumnIndex::resolve(&columns)?;

    let mut observations = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        observations.push(Observation::from_record(&record, &index, line)?);
    }
    log::info!(
        "ingest: parsed {} rows with columns [{}]",
        observations.len(),
        columns.join(", ")
    );
    Ok((columns, observations))
}

/// Read a table from a file on disk.
///
/// Workbook formats are rejected as unreadable; export the sheet as CSV.
pub fn read_path(path: &str) -> Result<Dataset, IngestError> {
    let lowered = path.to_lowercase();
    if lowered.ends_with(".xlsx") || lowered.ends_with(".xls") {
        return Err(IngestError::parse(
            "spreadsheet workbooks are not supported, export the sheet as CSV",
        ));
    }

    let bytes = std::fs::read(Path::new(path))?;
    let text = if lowered.ends_with(".gz") {
        let mut decoded = String::new();
        GzDecoder::new(bytes.as_slice()).read_to_string(&mut decoded)?;
        decoded
    } else {
        String::from_utf8(bytes).map_err(IngestError::parse)?
    };

    let (columns, observations) = read_str(&text, delimiter_for(path))?;
    Ok(Dataset {
        columns,
        observations,
        source: DataSource::File {
            path: path.to_string(),
        },
    })
}

/// Load the dataset for a session.
///
/// With no path the sample dataset is used. A file that cannot be parsed is
/// logged and replaced by the sample dataset (recorded in
/// [`DataSource::Fallback`]); a file that parses but lacks required columns
/// is an error.
pub fn load_or_sample(path: Option<&str>) -> Result<Dataset, IngestError> {
    let path = match path {
        Some(p) => p,
        None => {
            log::info!("ingest: no input file, using sample data");
            return Ok(sample::sample_dataset());
        }
    };
    match read_path(path) {
        Ok(dataset) => Ok(dataset),
        Err(IngestError::Parse(cause)) => {
            log::warn!("ingest: could not read {}: {}; using sample data", path, cause);
            let mut dataset = sample::sample_dataset();
            dataset.source = DataSource::Fallback {
                path: path.to_string(),
                cause,
            };
            Ok(dataset)
        }
        Err(schema) => Err(schema),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Size;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    const CSV_DATA: &str = "\
 Models , Size ,Question,Quality,Latency,CO2,Energy, Questions class
A,Small,1,5,1.0,0.10,0.2,Easy
A,Small,2,3,3.0,0.30,0.4,Hard
B,Large,1,4,2.0,0.50,0.9,Easy
";

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("cai-bench-{}-{}", std::process::id(), name))
    }

    #[test]
    fn read_str_trims_headers_and_keeps_row_order() {
        let (columns, obs) = read_str(CSV_DATA, b',').unwrap();
        assert_eq!(columns[0], "Models");
        assert_eq!(columns[7], "Questions class");
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].model, "A");
        assert_eq!(obs[1].question, 2);
        assert_eq!(obs[2].size, Size::Large);
        assert_eq!(obs[2].category, "Easy");
    }

    #[test]
    fn read_str_reports_missing_co2() {
        let data = "Models,Size,Question,Quality,Latency,Energy,Questions class\nA,Small,1,5,1,0.2,Easy\n";
        let err = read_str(data, b',').unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().starts_with("Missing columns: CO2"));
    }

    #[test]
    fn schema_is_checked_before_cells() {
        let data = "Models,Size\nA,enormous\n";
        assert!(read_str(data, b',').unwrap_err().is_schema());
    }

    #[test]
    fn ragged_rows_are_parse_errors() {
        let data = "Models,Size,Question,Quality,Latency,CO2,Energy,Questions class\nA,Small,1\n";
        assert!(matches!(read_str(data, b','), Err(IngestError::Parse(_))));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(read_str("", b','), Err(IngestError::Parse(_))));
    }

    #[test]
    fn delimiter_follows_extension() {
        assert_eq!(delimiter_for("bench.csv"), b',');
        assert_eq!(delimiter_for("bench.TSV"), b'\t');
        assert_eq!(delimiter_for("bench.tsv.gz"), b'\t');
        assert_eq!(delimiter_for("bench"), b',');
    }

    #[test]
    fn read_path_handles_tsv_and_gzip() {
        let tsv = CSV_DATA.replace(',', "\t");
        let path = temp_path("bench.tsv.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(tsv.as_bytes()).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let dataset = read_path(path.to_str().unwrap()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert!(matches!(dataset.source, DataSource::File { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_or_sample_without_path_uses_sample() {
        let dataset = load_or_sample(None).unwrap();
        assert_eq!(dataset.source, DataSource::Sample);
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn load_or_sample_falls_back_on_parse_error() {
        let path = temp_path("missing-file.csv");
        let dataset = load_or_sample(path.to_str()).unwrap();
        match dataset.source {
            DataSource::Fallback { ref cause, .. } => assert!(!cause.is_empty()),
            other => panic!("expected fallback, got {:?}", other),
        }
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn load_or_sample_halts_on_schema_error() {
        let path = temp_path("no-co2.csv");
        std::fs::write(
            &path,
            "Models,Size,Question,Quality,Latency,Energy,Questions class\nA,Small,1,5,1,0.2,Easy\n",
        )
        .unwrap();
        let err = load_or_sample(path.to_str()).unwrap_err();
        assert!(err.is_schema());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn blank_cells_keep_the_file() {
        let path = temp_path("blank-latency.csv");
        std::fs::write(
            &path,
            "Models,Size,Question,Quality,Latency,CO2,Energy,Questions class\n\
             A,Small,1,5,,0.1,0.2,Easy\n\
             A,Small,2,3,NaN,0.3,0.4,Hard\n",
        )
        .unwrap();
        let dataset = load_or_sample(path.to_str()).unwrap();
        assert!(matches!(dataset.source, DataSource::File { .. }));
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.observations[0].latency, None);
        assert_eq!(dataset.observations[1].latency, None);
        assert_eq!(dataset.observations[1].quality, Some(3.0));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn workbooks_are_rejected() {
        assert!(matches!(read_path("results.xlsx"), Err(IngestError::Parse(_))));
    }
}
