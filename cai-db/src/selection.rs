//! Model and category selection.
//!
//! The selection is plain set membership: an observation is visible to the
//! aggregate queries when both its model and its category are selected.

use crate::Database;
use rusqlite::{params, Connection};

/// Select every model and category currently in `observations`.
pub(crate) fn select_everything(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "DELETE FROM selected_models;
         DELETE FROM selected_categories;
         INSERT INTO selected_models SELECT DISTINCT model FROM observations;
         INSERT INTO selected_categories SELECT DISTINCT category FROM observations;",
    )
}

impl Database {
    /// Replace the current selection.
    ///
    /// An empty `models` or `categories` slice selects every value of that
    /// column. Names that do not occur in the dataset select nothing.
    pub fn select(&self, models: &[String], categories: &[String]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        select_everything(&tx)?;
        if !models.is_empty() {
            tx.execute("DELETE FROM selected_models", [])?;
            for model in models {
                tx.execute(
                    "INSERT OR IGNORE INTO selected_models (model) VALUES (?1)",
                    params![model],
                )?;
            }
        }
        if !categories.is_empty() {
            tx.execute("DELETE FROM selected_categories", [])?;
            for category in categories {
                tx.execute(
                    "INSERT OR IGNORE INTO selected_categories (category) VALUES (?1)",
                    params![category],
                )?;
            }
        }
        tx.commit()?;
        log::info!(
            "selection: {} models, {} categories requested",
            models.len(),
            categories.len()
        );
        Ok(())
    }

    /// Selected models present in the dataset, in first-seen order.
    pub fn query_selected_models(&self) -> anyhow::Result<Vec<String>> {
        self.query_strings(
            "SELECT o.model FROM observations o
             WHERE o.model IN (SELECT model FROM selected_models)
             GROUP BY o.model
             ORDER BY MIN(o.id)",
        )
    }

    /// Selected categories present in the dataset, in first-seen order.
    pub fn query_selected_categories(&self) -> anyhow::Result<Vec<String>> {
        self.query_strings(
            "SELECT o.category FROM observations o
             WHERE o.category IN (SELECT category FROM selected_categories)
             GROUP BY o.category
             ORDER BY MIN(o.id)",
        )
    }

    pub(crate) fn query_strings(&self, sql: &str) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
