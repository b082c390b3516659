//! Normalized 0-100 scorecard.
//!
//! Quality is scaled against its 0-5 range. Latency, energy and CO2 are
//! scored against the worst value in the current selection, so the worst
//! model gets a score just above 0 and a zero cost scores 100. The overall
//! score is the plain mean of the sub-scores that are defined; it is not the
//! weighted composite described in [`crate::efficiency::DOCUMENTED_DESCRIPTION`].
//! Quality and speed scores are `None` for a group with no values in that
//! column.

use crate::aggregate::AggregateRow;
use crate::efficiency::STABILIZER;
use cai_bench::observation::Size;
use cai_utils::stats;
use serde::Serialize;

/// Upper bound of the quality scale.
pub const MAX_QUALITY: f64 = 5.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreRow {
    pub model: String,
    pub size: Size,
    pub quality_score: Option<f64>,
    pub speed_score: Option<f64>,
    pub energy_score: f64,
    pub co2_score: f64,
    pub overall_score: f64,
}

/// `(1 - value / (max + 0.01)) * 100`
fn inverse_score(value: f64, max: f64) -> f64 {
    (1.0 - value / (max + STABILIZER)) * 100.0
}

/// Score every aggregate row. Output order matches input order.
pub fn scorecard(rows: &[AggregateRow]) -> Vec<ScoreRow> {
    let column_max = |f: fn(&AggregateRow) -> Option<f64>| {
        let values: Vec<f64> = rows.iter().filter_map(f).collect();
        stats::max(&values).unwrap_or_default()
    };
    let max_latency = column_max(|r| r.avg_latency);
    let max_energy = column_max(|r| Some(r.total_energy));
    let max_co2 = column_max(|r| Some(r.total_co2));

    rows.iter()
        .map(|r| {
            let quality_score = r.avg_quality.map(|q| q / MAX_QUALITY * 100.0);
            let speed_score = r.avg_latency.map(|l| inverse_score(l, max_latency));
            let energy_score = inverse_score(r.total_energy, max_energy);
            let co2_score = inverse_score(r.total_co2, max_co2);
            let defined: Vec<f64> = [quality_score, speed_score, Some(energy_score), Some(co2_score)]
                .into_iter()
                .flatten()
                .collect();
            ScoreRow {
                model: r.model.clone(),
                size: r.size,
                quality_score,
                speed_score,
                energy_score,
                co2_score,
                overall_score: stats::mean(&defined).unwrap_or_default(),
            }
        })
        .collect()
}
