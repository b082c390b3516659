//! Efficiency rankings.
//!
//! Three views share the same metric, the (model, size) efficiency from
//! [`crate::aggregate`]:
//!
//! 1. [`global_ranking`]: every aggregate row, best first.
//! 2. [`best_per_size_category`]: the best (model, size, category) row for
//!    each (size, category).
//! 3. [`best_per_category`]: the best (model, size, category) row for each
//!    category regardless of size.
//!
//! Views 2 and 3 display per-(model, size, category) means, but rank them by
//! the efficiency of the enclosing (model, size) group, joined in by key.
//! The displayed numbers are finer grained than the metric; the metric is
//! identical across all three views.
//!
//! Rows without an efficiency (no quality or no energy values) sort after
//! every ranked row and never beat a row that has one.

use crate::aggregate::AggregateRow;
use cai_bench::observation::Size;
use cai_db::{models::CategoryMeans, Database};
use cai_utils::format::medal;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// An aggregate row with its position in the global ranking.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedRow {
    /// 1-based rank.
    pub rank: usize,
    /// Medal for ranks 1-3, otherwise the rank number.
    pub marker: String,
    #[serde(flatten)]
    pub row: AggregateRow,
}

/// Per-(model, size, category) means with the (model, size) efficiency.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryEfficiency {
    pub model: String,
    pub size: Size,
    pub category: String,
    pub quality: Option<f64>,
    pub latency: Option<f64>,
    pub co2: Option<f64>,
    pub energy: Option<f64>,
    pub efficiency: Option<f64>,
}

/// Highest first, missing values last.
fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort by efficiency, highest first, and number the rows from 1.
///
/// The sort is stable, so equal efficiencies keep their input order.
pub fn global_ranking(rows: &[AggregateRow]) -> Vec<RankedRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| descending_missing_last(a.efficiency, b.efficiency));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, row)| RankedRow {
            rank: i + 1,
            marker: medal(i + 1),
            row,
        })
        .collect()
}

/// Attach the (model, size) efficiency to each per-category mean row.
///
/// Rows whose (model, size) has no aggregate are dropped.
pub fn join_efficiency(
    means: Vec<CategoryMeans>,
    aggregates: &[AggregateRow],
) -> Vec<CategoryEfficiency> {
    let lookup: HashMap<(String, Size), Option<f64>> = aggregates
        .iter()
        .map(|a| ((a.model.clone(), a.size), a.efficiency))
        .collect();

    means
        .into_iter()
        .filter_map(|m| {
            let efficiency = match lookup.get(&(m.model.clone(), m.size)) {
                Some(e) => *e,
                None => {
                    log::warn!(
                        "ranking: no aggregate for ({}, {}), dropping {} row",
                        m.model,
                        m.size,
                        m.category
                    );
                    return None;
                }
            };
            Some(CategoryEfficiency {
                model: m.model,
                size: m.size,
                category: m.category,
                quality: m.quality,
                latency: m.latency,
                co2: m.co2,
                energy: m.energy,
                efficiency,
            })
        })
        .collect()
}

/// Keep the highest-efficiency row per key, in ascending key order.
///
/// Ties go to the row that comes first in `rows`.
fn arg_max_by<K, F>(rows: &[CategoryEfficiency], key: F) -> Vec<CategoryEfficiency>
where
    K: Ord,
    F: Fn(&CategoryEfficiency) -> K,
{
    let mut best: BTreeMap<K, &CategoryEfficiency> = BTreeMap::new();
    for row in rows {
        best.entry(key(row))
            .and_modify(|current| {
                if descending_missing_last(row.efficiency, current.efficiency) == Ordering::Less {
                    *current = row;
                }
            })
            .or_insert(row);
    }
    best.into_values().cloned().collect()
}

/// The best model per (size, category), ordered by size then category.
pub fn best_per_size_category(rows: &[CategoryEfficiency]) -> Vec<CategoryEfficiency> {
    arg_max_by(rows, |r| (r.size, r.category.clone()))
}

/// The best (model, size) per category, ordered by category.
pub fn best_per_category(rows: &[CategoryEfficiency]) -> Vec<CategoryEfficiency> {
    arg_max_by(rows, |r| r.category.clone())
}

/// Per-category rows with efficiency for the current selection.
pub fn compute_category_efficiency(
    db: &Database,
    aggregates: &[AggregateRow],
) -> anyhow::Result<Vec<CategoryEfficiency>> {
    let rows = join_efficiency(db.query_category_means()?, aggregates);
    log::debug!("ranking: {} (model, size, category) rows", rows.len());
    Ok(rows)
}
