use crate::ingest::{read_str, DataSource, Dataset};

/// Embedded sample table used when no file is supplied or the supplied file
/// cannot be parsed.
pub static SAMPLE_CSV: &str = include_str!("../../fixtures/sample.csv");

/// Get the built-in sample dataset.
pub fn sample_dataset() -> Dataset {
    if let Ok((columns, observations)) = read_str(SAMPLE_CSV, b',') {
        Dataset {
            columns,
            observations,
            source: DataSource::Sample,
        }
    } else {
        panic!("failed to parse embedded sample csv")
    }
}

#[cfg(test)]
mod tests {
    use super::sample_dataset;
    use crate::observation::Size;

    #[test]
    fn sample_dataset_has_three_small_llama_rows() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 3);
        assert!(dataset
            .observations
            .iter()
            .all(|o| o.model == "Meta LLaMA 3.1 8B" && o.size == Size::Small));
        assert_eq!(dataset.observations[2].energy, Some(1.24));
    }
}
