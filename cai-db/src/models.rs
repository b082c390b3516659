//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be emitted as JSON by the CLI.

use cai_bench::observation::Size;
use serde::Serialize;

/// Raw per-(model, size) statistics over the filtered observations.
///
/// Derived scores (efficiency, normalized sub-scores) are computed on top of
/// these in `cai-data`. Means are `None` when every value in the group is
/// missing; totals of missing values are 0.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelSizeStats {
    pub model: String,
    pub size: Size,
    pub avg_quality: Option<f64>,
    /// Mean latency in seconds.
    pub avg_latency: Option<f64>,
    pub total_co2: f64,
    pub avg_co2: Option<f64>,
    pub total_energy: f64,
    pub avg_energy: Option<f64>,
    /// Number of observations in the group.
    pub count: i64,
}

/// Per-(model, size, category) means of every numeric column.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryMeans {
    pub model: String,
    pub size: Size,
    pub category: String,
    /// Mean question id, kept for parity with a full numeric mean of the group.
    pub question: f64,
    pub quality: Option<f64>,
    pub latency: Option<f64>,
    pub co2: Option<f64>,
    pub energy: Option<f64>,
}

/// Whole-selection totals for the overview metrics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionTotals {
    /// Number of filtered observations (tests run).
    pub count: i64,
    pub total_co2: f64,
    pub total_energy: f64,
    /// Means are `None` when the selection is empty.
    pub avg_co2: Option<f64>,
    pub avg_energy: Option<f64>,
    pub avg_quality: Option<f64>,
}

/// Mean quality for one (category, question) heatmap cell.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeatmapCell {
    pub category: String,
    pub question: i64,
    pub avg_quality: Option<f64>,
}
