use crate::aggregate::{compute_aggregates, AggregateRow};
use crate::efficiency::COMPUTED_FORMULA;
use crate::latency::{latency_distributions, latency_ranking, LatencyDistribution};
use crate::overview::{compute_overview, Overview};
use crate::ranking::{
    best_per_category, best_per_size_category, compute_category_efficiency, global_ranking,
    CategoryEfficiency, RankedRow,
};
use crate::scorecard::{scorecard, ScoreRow};
use cai_bench::ingest::DataSource;
use cai_bench::observation::Observation;
use cai_db::models::HeatmapCell;
use cai_db::Database;
use serde::Serialize;

/// The current model/category selection, plus everything that could be selected.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionSummary {
    pub models: Vec<String>,
    pub categories: Vec<String>,
    pub available_models: Vec<String>,
    pub available_categories: Vec<String>,
}

impl SelectionSummary {
    pub fn query(db: &Database) -> anyhow::Result<SelectionSummary> {
        Ok(SelectionSummary {
            models: db.query_selected_models()?,
            categories: db.query_selected_categories()?,
            available_models: db.query_models()?,
            available_categories: db.query_categories()?,
        })
    }
}

/// Every derived view for one selection, ready to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: DataSource,
    pub columns: Vec<String>,
    pub selection: SelectionSummary,
    pub overview: Overview,
    pub efficiency_formula: &'static str,
    pub aggregates: Vec<AggregateRow>,
    pub ranking: Vec<RankedRow>,
    pub best_by_size_and_category: Vec<CategoryEfficiency>,
    pub best_by_category: Vec<CategoryEfficiency>,
    pub scores: Vec<ScoreRow>,
    pub latency_ranking: Vec<AggregateRow>,
    pub latency_distribution: Vec<LatencyDistribution>,
    pub quality_heatmap: Vec<HeatmapCell>,
    /// Selected observations in input order; the per-question and scatter
    /// series are read straight from these.
    pub observations: Vec<Observation>,
}

impl Report {
    /// Recompute every view from the database's current selection.
    pub fn build(db: &Database, source: DataSource, columns: Vec<String>) -> anyhow::Result<Report> {
        let aggregates = compute_aggregates(db)?;
        let category_rows = compute_category_efficiency(db, &aggregates)?;
        let observations = db.query_filtered_observations()?;

        let report = Report {
            source,
            columns,
            selection: SelectionSummary::query(db)?,
            overview: compute_overview(db)?,
            efficiency_formula: COMPUTED_FORMULA,
            ranking: global_ranking(&aggregates),
            best_by_size_and_category: best_per_size_category(&category_rows),
            best_by_category: best_per_category(&category_rows),
            scores: scorecard(&aggregates),
            latency_ranking: latency_ranking(&aggregates),
            latency_distribution: latency_distributions(&observations),
            quality_heatmap: db.query_quality_heatmap()?,
            aggregates,
            observations,
        };
        log::info!(
            "report: {} aggregates, {} observations",
            report.aggregates.len(),
            report.observations.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::database;
    use cai_bench::sample::SAMPLE_CSV;

    #[test]
    fn report_over_sample_data() {
        let db = database(SAMPLE_CSV);
        let report = Report::build(&db, DataSource::Sample, Vec::new()).unwrap();
        assert_eq!(report.aggregates.len(), 1);
        assert_eq!(report.ranking[0].marker, "🥇");
        assert_eq!(report.best_by_category.len(), 1);
        assert_eq!(report.best_by_size_and_category.len(), 1);
        assert_eq!(report.scores.len(), 1);
        assert_eq!(report.observations.len(), 3);
        assert_eq!(report.selection.models, vec!["Meta LLaMA 3.1 8B"]);
    }

    #[test]
    fn report_follows_selection_changes() {
        let db = database(SAMPLE_CSV);
        db.select(&["someone else".to_string()], &[]).unwrap();
        let report = Report::build(&db, DataSource::Sample, Vec::new()).unwrap();
        assert!(report.aggregates.is_empty());
        assert!(report.ranking.is_empty());
        assert_eq!(report.overview.tests_run, 0);
        assert_eq!(report.selection.available_models.len(), 1);
    }
}
