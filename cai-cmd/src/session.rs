//! One CLI invocation's working data.

use cai_bench::ingest::{load_or_sample, DataSource};
use cai_db::Database;

/// The loaded dataset in its session database, with the active selection.
pub struct Session {
    pub db: Database,
    pub source: DataSource,
    /// Detected (trimmed) column names of the loaded table.
    pub columns: Vec<String>,
    pub rows: usize,
}

impl Session {
    /// Ingest `input` (or the sample data) and load it into a fresh database.
    ///
    /// A file that cannot be parsed falls back to the sample data; a missing
    /// required column aborts with the [`cai_bench::error::IngestError::Schema`] message.
    pub fn open(input: Option<&str>) -> anyhow::Result<Session> {
        let dataset = load_or_sample(input)?;
        let db = Database::new()?;
        db.load_observations(&dataset.observations)?;
        log::info!(
            "session: {} rows loaded from {:?}",
            dataset.observations.len(),
            dataset.source
        );
        Ok(Session {
            db,
            rows: dataset.observations.len(),
            source: dataset.source,
            columns: dataset.columns,
        })
    }

    /// Replace the model/category selection; empty slices select everything.
    pub fn select(&self, models: &[String], categories: &[String]) -> anyhow::Result<()> {
        self.db.select(models, categories)
    }

    /// Human readable note about where the data came from.
    pub fn source_note(&self) -> String {
        match &self.source {
            DataSource::File { path } => format!(
                "{} rows loaded from {}\nDetected columns: {}",
                self.rows,
                path,
                self.columns.join(", ")
            ),
            DataSource::Sample => "Sample data loaded".to_string(),
            DataSource::Fallback { path, cause } => format!(
                "Error: could not read {}: {}\nSample data loaded instead",
                path, cause
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cai_bench::error::IngestError;

    #[test]
    fn open_without_input_uses_sample() {
        let session = Session::open(None).unwrap();
        assert_eq!(session.source, DataSource::Sample);
        assert_eq!(session.rows, 3);
        assert_eq!(session.source_note(), "Sample data loaded");
    }

    #[test]
    fn open_reports_schema_errors() {
        let path = std::env::temp_dir().join(format!("cai-cmd-{}-no-co2.csv", std::process::id()));
        std::fs::write(
            &path,
            "Models,Size,Question,Quality,Latency,Energy,Questions class\nA,Small,1,5,1,0.2,Easy\n",
        )
        .unwrap();
        let err = Session::open(path.to_str()).err().unwrap();
        let schema = err.downcast_ref::<IngestError>().unwrap();
        assert!(schema.is_schema());
        assert!(err.to_string().starts_with("Missing columns: CO2"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn open_keeps_rows_with_missing_measurements() {
        let path = std::env::temp_dir().join(format!("cai-cmd-{}-nan.csv", std::process::id()));
        std::fs::write(
            &path,
            "Models,Size,Question,Quality,Latency,CO2,Energy,Questions class\n\
             A,Small,1,5,NaN,0.1,0.2,Easy\n\
             A,Small,2,3,,0.3,0.4,Hard\n\
             A,Small,3,4,2.5,0.2,0.3,Easy\n",
        )
        .unwrap();
        let session = Session::open(path.to_str()).unwrap();
        assert!(matches!(session.source, DataSource::File { .. }));
        assert_eq!(session.rows, 3);

        let stats = session.db.query_model_size_stats().unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[0].avg_latency, Some(2.5));
        assert!((stats[0].avg_quality.unwrap() - 4.0).abs() < 1e-9);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn open_falls_back_on_unreadable_file() {
        let session = Session::open(Some("/definitely/not/here.csv")).unwrap();
        assert!(matches!(session.source, DataSource::Fallback { .. }));
        assert!(session.source_note().starts_with("Error: could not read"));
    }
}
