use crate::efficiency::efficiency;
use cai_bench::observation::Size;
use cai_db::{models::ModelSizeStats, Database};
use serde::Serialize;

/// Per-(model, size) summary with its efficiency score.
///
/// Efficiency is `None` when the group has no quality or no energy values.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AggregateRow {
    pub model: String,
    pub size: Size,
    pub avg_quality: Option<f64>,
    pub avg_latency: Option<f64>,
    pub total_co2: f64,
    pub avg_co2: Option<f64>,
    pub total_energy: f64,
    pub avg_energy: Option<f64>,
    pub efficiency: Option<f64>,
}

impl From<ModelSizeStats> for AggregateRow {
    fn from(stats: ModelSizeStats) -> Self {
        AggregateRow {
            efficiency: stats
                .avg_quality
                .zip(stats.avg_energy)
                .map(|(quality, energy)| efficiency(quality, energy)),
            model: stats.model,
            size: stats.size,
            avg_quality: stats.avg_quality,
            avg_latency: stats.avg_latency,
            total_co2: stats.total_co2,
            avg_co2: stats.avg_co2,
            total_energy: stats.total_energy,
            avg_energy: stats.avg_energy,
        }
    }
}

/// One aggregate row per (model, size) group in the current selection,
/// model ascending then Small, Medium, Large.
pub fn compute_aggregates(db: &Database) -> anyhow::Result<Vec<AggregateRow>> {
    let rows: Vec<AggregateRow> = db
        .query_model_size_stats()?
        .into_iter()
        .map(AggregateRow::from)
        .collect();
    log::debug!("aggregate: {} (model, size) groups", rows.len());
    Ok(rows)
}
