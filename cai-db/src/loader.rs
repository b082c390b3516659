//! Loading validated observations into the session database.
//!
//! Observations arrive already parsed and schema-checked by
//! `cai_bench::ingest`, so the loader only has to store them. Loading
//! replaces any previous dataset and resets the selection to everything.

use crate::selection::select_everything;
use crate::Database;
use cai_bench::observation::Observation;
use rusqlite::params;

impl Database {
    /// Replace the session dataset with `observations`.
    ///
    /// Row order is preserved in the `id` column. After loading, every model
    /// and every category is selected.
    pub fn load_observations(&self, observations: &[Observation]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM observations", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO observations
                 (id, model, size, question, quality, latency, co2, energy, category)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for (i, obs) in observations.iter().enumerate() {
                stmt.execute(params![
                    (i + 1) as i64,
                    obs.model,
                    obs.size.rank(),
                    obs.question,
                    obs.quality,
                    obs.latency,
                    obs.co2,
                    obs.energy,
                    obs.category,
                ])?;
            }
        }
        select_everything(&tx)?;
        tx.commit()?;
        log::info!("loader: Loaded {} observations", observations.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::observations;
    use crate::Database;

    #[test]
    fn load_observations_keeps_every_row() {
        let db = Database::new().unwrap();
        db.load_observations(&observations()).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 5);

        let first: String = conn
            .query_row("SELECT model FROM observations WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(first, "B");
    }

    #[test]
    fn load_observations_replaces_previous_dataset() {
        let db = Database::new().unwrap();
        db.load_observations(&observations()).unwrap();
        db.load_observations(&observations()[..2]).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2, "Second load should replace the first");
    }

    #[test]
    fn load_observations_selects_everything() {
        let db = Database::new().unwrap();
        db.load_observations(&observations()).unwrap();

        let conn = db.conn.borrow();
        let filtered: i64 = conn
            .query_row("SELECT COUNT(*) FROM filtered_observations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(filtered, 5);
    }
}
