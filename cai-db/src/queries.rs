//! Typed query methods over the session database.
//!
//! Every aggregate reads the `filtered_observations` view, so the result
//! always reflects the current selection. Grouped results come back in the
//! group key's natural order: model ascending (byte order), then size
//! Small, Medium, Large, then category ascending.

use crate::models::{CategoryMeans, HeatmapCell, ModelSizeStats, SelectionTotals};
use crate::Database;
use cai_bench::observation::{Observation, Size};
use rusqlite::Row;

impl Database {
    /// All models in the dataset in first-seen order, ignoring the selection.
    pub fn query_models(&self) -> anyhow::Result<Vec<String>> {
        self.query_strings("SELECT model FROM observations GROUP BY model ORDER BY MIN(id)")
    }

    /// All categories in the dataset in first-seen order, ignoring the selection.
    pub fn query_categories(&self) -> anyhow::Result<Vec<String>> {
        self.query_strings("SELECT category FROM observations GROUP BY category ORDER BY MIN(id)")
    }

    /// Every observation in input order, ignoring the selection.
    pub fn query_observations(&self) -> anyhow::Result<Vec<Observation>> {
        self.query_observation_rows("SELECT * FROM observations ORDER BY id")
    }

    /// Selected observations in input order.
    pub fn query_filtered_observations(&self) -> anyhow::Result<Vec<Observation>> {
        self.query_observation_rows("SELECT * FROM filtered_observations ORDER BY id")
    }

    fn query_observation_rows(&self, sql: &str) -> anyhow::Result<Vec<Observation>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Observation {
                    model: row.get("model")?,
                    size: size_at(row, "size")?,
                    question: row.get("question")?,
                    quality: row.get("quality")?,
                    latency: row.get("latency")?,
                    co2: row.get("co2")?,
                    energy: row.get("energy")?,
                    category: row.get("category")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("query: observation rows returned {} records", rows.len());
        Ok(rows)
    }

    /// Per-(model, size) means and sums over the selection.
    ///
    /// Quality and latency are averaged; CO2 and energy are both summed and
    /// averaged. One row per group that has at least one selected observation.
    pub fn query_model_size_stats(&self) -> anyhow::Result<Vec<ModelSizeStats>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT model, size,
                    AVG(quality), AVG(latency),
                    COALESCE(SUM(co2), 0.0), AVG(co2),
                    COALESCE(SUM(energy), 0.0), AVG(energy),
                    COUNT(*)
             FROM filtered_observations
             GROUP BY model, size
             ORDER BY model, size",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ModelSizeStats {
                    model: row.get(0)?,
                    size: size_at(row, 1)?,
                    avg_quality: row.get(2)?,
                    avg_latency: row.get(3)?,
                    total_co2: row.get(4)?,
                    avg_co2: row.get(5)?,
                    total_energy: row.get(6)?,
                    avg_energy: row.get(7)?,
                    count: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_model_size_stats returned {} records", rows.len());
        Ok(rows)
    }

    /// Per-(model, size, category) means of every numeric column.
    pub fn query_category_means(&self) -> anyhow::Result<Vec<CategoryMeans>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT model, size, category,
                    AVG(question), AVG(quality), AVG(latency), AVG(co2), AVG(energy)
             FROM filtered_observations
             GROUP BY model, size, category
             ORDER BY model, size, category",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CategoryMeans {
                    model: row.get(0)?,
                    size: size_at(row, 1)?,
                    category: row.get(2)?,
                    question: row.get(3)?,
                    quality: row.get(4)?,
                    latency: row.get(5)?,
                    co2: row.get(6)?,
                    energy: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_category_means returned {} records", rows.len());
        Ok(rows)
    }

    /// Totals and means over the whole selection.
    pub fn query_selection_totals(&self) -> anyhow::Result<SelectionTotals> {
        let conn = self.conn.borrow();
        let totals = conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(co2), 0.0), COALESCE(SUM(energy), 0.0),
                    AVG(co2), AVG(energy), AVG(quality)
             FROM filtered_observations",
            [],
            |row| {
                Ok(SelectionTotals {
                    count: row.get(0)?,
                    total_co2: row.get(1)?,
                    total_energy: row.get(2)?,
                    avg_co2: row.get(3)?,
                    avg_energy: row.get(4)?,
                    avg_quality: row.get(5)?,
                })
            },
        )?;
        log::info!("query: query_selection_totals over {} records", totals.count);
        Ok(totals)
    }

    /// Mean quality per (category, question), both ascending.
    pub fn query_quality_heatmap(&self) -> anyhow::Result<Vec<HeatmapCell>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT category, question, AVG(quality)
             FROM filtered_observations
             GROUP BY category, question
             ORDER BY category, question",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(HeatmapCell {
                    category: row.get(0)?,
                    question: row.get(1)?,
                    avg_quality: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_quality_heatmap returned {} records", rows.len());
        Ok(rows)
    }
}

// ───────────────────── Helper Functions ─────────────────────

/// Read a stored [`Size::rank`] back into a [`Size`].
fn size_at<I: rusqlite::RowIndex + Copy>(row: &Row<'_>, idx: I) -> rusqlite::Result<Size> {
    let rank: i64 = row.get(idx)?;
    Size::from_rank(rank).ok_or(rusqlite::Error::IntegralValueOutOfRange(0, rank))
}
