use cai_db::Database;
use cai_utils::stats;
use serde::Serialize;

/// Headline metrics over the current selection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Overview {
    pub total_co2: f64,
    pub avg_co2: Option<f64>,
    pub total_energy: f64,
    pub avg_energy: Option<f64>,
    pub avg_quality: Option<f64>,
    /// Sample standard deviation; needs at least two quality values.
    pub quality_std: Option<f64>,
    pub tests_run: i64,
}

pub fn compute_overview(db: &Database) -> anyhow::Result<Overview> {
    let totals = db.query_selection_totals()?;
    let qualities: Vec<f64> = db
        .query_filtered_observations()?
        .iter()
        .filter_map(|o| o.quality)
        .collect();
    Ok(Overview {
        total_co2: totals.total_co2,
        avg_co2: totals.avg_co2,
        total_energy: totals.total_energy,
        avg_energy: totals.avg_energy,
        avg_quality: totals.avg_quality,
        quality_std: stats::sample_std(&qualities),
        tests_run: totals.count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{approx, database};
    use cai_bench::sample::SAMPLE_CSV;

    #[test]
    fn overview_of_sample_data() {
        let db = database(SAMPLE_CSV);
        let overview = compute_overview(&db).unwrap();
        assert_eq!(overview.tests_run, 3);
        assert!(approx(overview.total_co2, 1.04));
        assert!(approx(overview.avg_co2.unwrap(), 1.04 / 3.0));
        assert!(approx(overview.total_energy, 1.69));
        assert!(approx(overview.avg_quality.unwrap(), 11.0 / 3.0));
        assert!(approx(overview.quality_std.unwrap(), (4.0f64 / 3.0).sqrt()));
    }

    #[test]
    fn overview_of_single_row_has_no_std() {
        let db = database(SAMPLE_CSV);
        db.select(&[], &["nothing".to_string()]).unwrap();
        let empty = compute_overview(&db).unwrap();
        assert_eq!(empty.tests_run, 0);
        assert_eq!(empty.total_energy, 0.0);
        assert!(empty.avg_quality.is_none());
        assert!(empty.quality_std.is_none());

        let one = database(
            "Models,Size,Question,Quality,Latency,CO2,Energy,Questions class\n\
             A,Small,1,5,1,0.1,0.2,Easy\n",
        );
        assert!(compute_overview(&one).unwrap().quality_std.is_none());
    }
}
