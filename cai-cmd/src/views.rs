//! Table views over the derived data.
//!
//! Each function recomputes its view from the session's current selection
//! and returns it ready for [`crate::render::emit`].

use crate::render::View;
use crate::session::Session;
use cai_bench::observation::Observation;
use cai_data::aggregate::{compute_aggregates, AggregateRow};
use cai_data::latency::{latency_distributions, latency_ranking, LatencyDistribution};
use cai_data::overview::{compute_overview, Overview};
use cai_data::ranking::{
    best_per_category, best_per_size_category, compute_category_efficiency, global_ranking,
    CategoryEfficiency, RankedRow,
};
use cai_data::scorecard::{scorecard, ScoreRow};
use cai_db::models::HeatmapCell;
use cai_utils::format::{fixed, fixed_or_dash};
use std::collections::BTreeSet;

pub fn overview(session: &Session) -> anyhow::Result<View<Overview>> {
    let o = compute_overview(&session.db)?;
    let mut view = View::new("Overview", &["Metric", "Value"], o.clone());
    view.row(vec!["Total CO₂ (kg)".into(), fixed(o.total_co2, 2)]);
    view.row(vec!["Avg CO₂ (kg)".into(), fixed_or_dash(o.avg_co2, 3)]);
    view.row(vec!["Total Energy (kWh)".into(), fixed(o.total_energy, 2)]);
    view.row(vec!["Avg Energy (kWh)".into(), fixed_or_dash(o.avg_energy, 3)]);
    view.row(vec!["Avg Quality (/5)".into(), fixed_or_dash(o.avg_quality, 2)]);
    view.row(vec!["Quality σ".into(), fixed_or_dash(o.quality_std, 2)]);
    view.row(vec!["Tests Run".into(), o.tests_run.to_string()]);
    Ok(view)
}

fn observation_view(title: &str, observations: Vec<Observation>) -> View<Vec<Observation>> {
    let rows: Vec<Vec<String>> = observations
        .iter()
        .map(|o| {
            vec![
                o.model.clone(),
                o.size.to_string(),
                o.question.to_string(),
                fixed_or_dash(o.quality, 2),
                fixed_or_dash(o.latency, 2),
                fixed_or_dash(o.co2, 2),
                fixed_or_dash(o.energy, 2),
                o.category.clone(),
            ]
        })
        .collect();
    let mut view = View::new(
        title,
        &["Models", "Size", "Question", "Quality", "Latency", "CO2", "Energy", "Questions class"],
        observations,
    );
    view.rows = rows;
    view
}

/// The whole loaded table, ignoring the selection.
pub fn dataset(session: &Session) -> anyhow::Result<View<Vec<Observation>>> {
    Ok(observation_view("Dataset Overview", session.db.query_observations()?))
}

/// Selected rows; the data behind the per-question and scatter charts.
pub fn observations(session: &Session) -> anyhow::Result<View<Vec<Observation>>> {
    Ok(observation_view(
        "Selected Observations",
        session.db.query_filtered_observations()?,
    ))
}

pub fn aggregates(session: &Session) -> anyhow::Result<View<Vec<AggregateRow>>> {
    let rows = compute_aggregates(&session.db)?;
    Ok(aggregate_view("Aggregates by Model and Size", rows))
}

fn aggregate_view(title: &str, rows: Vec<AggregateRow>) -> View<Vec<AggregateRow>> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.model.clone(),
                r.size.to_string(),
                fixed_or_dash(r.avg_quality, 2),
                fixed_or_dash(r.avg_latency, 2),
                fixed(r.total_co2, 2),
                fixed_or_dash(r.avg_co2, 3),
                fixed(r.total_energy, 2),
                fixed_or_dash(r.avg_energy, 3),
                fixed_or_dash(r.efficiency, 2),
            ]
        })
        .collect();
    let mut view = View::new(
        title,
        &[
            "Model",
            "Size",
            "Avg Quality",
            "Avg Latency (s)",
            "Total CO₂ (kg)",
            "Avg CO₂ (kg)",
            "Total Energy (kWh)",
            "Avg Energy (kWh)",
            "Efficiency",
        ],
        rows,
    );
    view.rows = cells;
    view
}

pub fn ranking(session: &Session) -> anyhow::Result<View<Vec<RankedRow>>> {
    let ranked = global_ranking(&compute_aggregates(&session.db)?);
    let cells: Vec<Vec<String>> = ranked
        .iter()
        .map(|r| {
            vec![
                r.marker.clone(),
                r.row.model.clone(),
                r.row.size.to_string(),
                fixed_or_dash(r.row.avg_quality, 2),
                fixed_or_dash(r.row.avg_latency, 2),
                fixed(r.row.total_energy, 2),
                fixed(r.row.total_co2, 2),
                fixed_or_dash(r.row.efficiency, 2),
            ]
        })
        .collect();
    let mut view = View::new(
        "Best Trade-off Ranking",
        &[
            "🏅 Rank",
            "Model",
            "Size",
            "Avg Quality",
            "Avg Latency (s)",
            "Total Energy (kWh)",
            "Total CO₂ (kg)",
            "Efficiency",
        ],
        ranked,
    );
    view.rows = cells;
    Ok(view)
}

/// Which best-of table to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BestBy {
    /// Best model for every (size, category) pair
    #[default]
    SizeCategory,
    /// Best (model, size) for every category
    Category,
}

pub fn best(session: &Session, by: BestBy) -> anyhow::Result<View<Vec<CategoryEfficiency>>> {
    let aggregates = compute_aggregates(&session.db)?;
    let rows = compute_category_efficiency(&session.db, &aggregates)?;
    let (title, best) = match by {
        BestBy::SizeCategory => (
            "Best model trade-off by Size and Questions class",
            best_per_size_category(&rows),
        ),
        BestBy::Category => ("Best model per Questions class", best_per_category(&rows)),
    };
    let cells: Vec<Vec<String>> = best
        .iter()
        .map(|r| {
            vec![
                r.model.clone(),
                r.size.to_string(),
                r.category.clone(),
                fixed_or_dash(r.quality, 2),
                fixed_or_dash(r.latency, 2),
                fixed_or_dash(r.co2, 2),
                fixed_or_dash(r.energy, 2),
                fixed_or_dash(r.efficiency, 3),
            ]
        })
        .collect();
    let mut view = View::new(
        title,
        &["Model", "Size", "Questions class", "Quality", "Latency", "CO2", "Energy", "Score"],
        best,
    );
    view.rows = cells;
    Ok(view)
}

pub fn scores(session: &Session) -> anyhow::Result<View<Vec<ScoreRow>>> {
    let scores = scorecard(&compute_aggregates(&session.db)?);
    let cells: Vec<Vec<String>> = scores
        .iter()
        .map(|s| {
            vec![
                s.model.clone(),
                s.size.to_string(),
                fixed_or_dash(s.quality_score, 1),
                fixed_or_dash(s.speed_score, 1),
                fixed(s.energy_score, 1),
                fixed(s.co2_score, 1),
                fixed(s.overall_score, 1),
            ]
        })
        .collect();
    let mut view = View::new(
        "Normalized Scores (0-100)",
        &["Model", "Size", "Quality", "Speed", "Energy", "CO₂", "Overall"],
        scores,
    );
    view.rows = cells;
    Ok(view)
}

pub fn latency(session: &Session) -> anyhow::Result<View<Vec<AggregateRow>>> {
    let rows = latency_ranking(&compute_aggregates(&session.db)?);
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.model.clone(),
                r.size.to_string(),
                r.avg_latency
                    .map_or_else(|| "-".to_string(), |l| format!("{}s", fixed(l, 2))),
            ]
        })
        .collect();
    let mut view = View::new(
        "Average Latency by Model",
        &["Model", "Size", "Avg Latency"],
        rows,
    );
    view.rows = cells;
    Ok(view)
}

pub fn latency_distribution(session: &Session) -> anyhow::Result<View<Vec<LatencyDistribution>>> {
    let dists = latency_distributions(&session.db.query_filtered_observations()?);
    let cells: Vec<Vec<String>> = dists
        .iter()
        .map(|d| {
            vec![
                d.model.clone(),
                d.size.to_string(),
                d.count.to_string(),
                fixed(d.min, 2),
                fixed(d.q1, 2),
                fixed(d.median, 2),
                fixed(d.q3, 2),
                fixed(d.max, 2),
            ]
        })
        .collect();
    let mut view = View::new(
        "Latency Distribution",
        &["Model", "Size", "N", "Min", "Q1", "Median", "Q3", "Max"],
        dists,
    );
    view.rows = cells;
    Ok(view)
}

/// Mean quality pivoted to one row per category and one column per question.
pub fn heatmap(session: &Session) -> anyhow::Result<View<Vec<HeatmapCell>>> {
    let cells = session.db.query_quality_heatmap()?;
    let questions: BTreeSet<i64> = cells.iter().map(|c| c.question).collect();
    let categories: Vec<&str> = {
        let mut seen: Vec<&str> = cells.iter().map(|c| c.category.as_str()).collect();
        seen.dedup();
        seen
    };

    let question_labels: Vec<String> = questions.iter().map(|q| q.to_string()).collect();
    let mut headers: Vec<&str> = vec!["Category"];
    headers.extend(question_labels.iter().map(|s| s.as_str()));

    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|category| {
            let mut row = vec![category.to_string()];
            for q in &questions {
                let value = cells
                    .iter()
                    .find(|c| c.category == *category && c.question == *q)
                    .and_then(|c| c.avg_quality);
                row.push(fixed_or_dash(value, 2));
            }
            row
        })
        .collect();

    let mut view = View::new("Quality Heatmap by Category", &headers, cells.clone());
    view.rows = rows;
    Ok(view)
}
