//! Latency views: ranking by mean latency and per-group distributions.

use crate::aggregate::AggregateRow;
use cai_bench::observation::{Observation, Size};
use cai_utils::stats::quantile_sorted;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Five-number summary of per-question latency for one (model, size).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LatencyDistribution {
    pub model: String,
    pub size: Size,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Aggregate rows ordered by mean latency, fastest first (stable). Groups
/// without any latency come last.
pub fn latency_ranking(rows: &[AggregateRow]) -> Vec<AggregateRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| match (a.avg_latency, b.avg_latency) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Latency distribution per (model, size), in group key order. Missing
/// latencies are skipped.
pub fn latency_distributions(observations: &[Observation]) -> Vec<LatencyDistribution> {
    let mut groups: BTreeMap<(&str, Size), Vec<f64>> = BTreeMap::new();
    for obs in observations {
        if let Some(latency) = obs.latency {
            groups
                .entry((obs.model.as_str(), obs.size))
                .or_default()
                .push(latency);
        }
    }

    groups
        .into_iter()
        .filter_map(|((model, size), mut latencies)| {
            latencies.sort_by(f64::total_cmp);
            let q = |p: f64| quantile_sorted(&latencies, p);
            Some(LatencyDistribution {
                model: model.to_string(),
                size,
                count: latencies.len(),
                min: q(0.0)?,
                q1: q(0.25)?,
                median: q(0.5)?,
                q3: q(0.75)?,
                max: q(1.0)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::compute_aggregates;
    use crate::test_support::{approx, database};

    const CSV_DATA: &str = "\
Models,Size,Question,Quality,Latency,CO2,Energy,Questions class
B,Large,1,4,9.0,0.5,0.9,Easy
A,Small,1,5,4.0,0.1,0.2,Easy
A,Small,2,3,1.0,0.3,0.4,Hard
A,Small,3,3,3.0,0.3,0.4,Hard
A,Small,4,3,2.0,0.3,0.4,Hard
C,Medium,1,4,2.5,0.5,0.9,Easy
";

    #[test]
    fn latency_ranking_is_fastest_first() {
        let db = database(CSV_DATA);
        let ranked = latency_ranking(&compute_aggregates(&db).unwrap());
        let order: Vec<&str> = ranked.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(order, vec!["A", "C", "B"]);
    }

    #[test]
    fn distribution_uses_linear_quartiles() {
        let db = database(CSV_DATA);
        let dists = latency_distributions(&db.query_filtered_observations().unwrap());
        assert_eq!(dists.len(), 3);

        let a = &dists[0];
        assert_eq!((a.model.as_str(), a.size, a.count), ("A", Size::Small, 4));
        assert!(approx(a.min, 1.0));
        assert!(approx(a.q1, 1.75));
        assert!(approx(a.median, 2.5));
        assert!(approx(a.q3, 3.25));
        assert!(approx(a.max, 4.0));

        let b = &dists[1];
        assert_eq!(b.model, "B");
        assert!(approx(b.min, 9.0) && approx(b.max, 9.0) && approx(b.median, 9.0));
        assert_eq!(dists[2].model, "C");
    }

    #[test]
    fn missing_latencies_are_skipped() {
        let db = database(
            "Models,Size,Question,Quality,Latency,CO2,Energy,Questions class\n\
             A,Small,1,5,,0.1,0.2,Easy\n\
             A,Small,2,5,3.0,0.1,0.2,Easy\n\
             B,Large,1,4,NaN,0.5,0.9,Easy\n\
             C,Large,1,4,5.0,0.5,0.9,Easy\n",
        );
        let ranked = latency_ranking(&compute_aggregates(&db).unwrap());
        let order: Vec<&str> = ranked.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(order, vec!["A", "C", "B"]);

        let dists = latency_distributions(&db.query_filtered_observations().unwrap());
        assert_eq!(dists.len(), 2);
        assert_eq!(dists[0].count, 1);
        assert!(approx(dists[0].median, 3.0));
        assert_eq!(dists[1].model, "C");
    }

    #[test]
    fn no_observations_no_distributions() {
        assert!(latency_distributions(&[]).is_empty());
    }
}
