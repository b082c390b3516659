//! SQL schema definitions for the in-memory session database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// - `observations` - one row per benchmark measurement; `id` preserves input
///   order and `size` stores [`cai_bench::observation::Size::rank`] so that
///   `ORDER BY size` yields Small, Medium, Large. Measurements are NULL
///   when the input cell was missing; `AVG` and `SUM` skip them.
/// - `selected_models` / `selected_categories` - the current filter.
/// - `filtered_observations` - view of the observations whose model and
///   category are both selected. Every aggregate query reads from this view.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS observations (
        id INTEGER PRIMARY KEY,
        model TEXT NOT NULL,
        size INTEGER NOT NULL,
        question INTEGER NOT NULL,
        quality REAL,
        latency REAL,
        co2 REAL,
        energy REAL,
        category TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_obs_model_size ON observations(model, size);
    CREATE INDEX IF NOT EXISTS idx_obs_category ON observations(category);

    CREATE TABLE IF NOT EXISTS selected_models (
        model TEXT PRIMARY KEY
    );

    CREATE TABLE IF NOT EXISTS selected_categories (
        category TEXT PRIMARY KEY
    );

    CREATE VIEW IF NOT EXISTS filtered_observations AS
        SELECT * FROM observations
        WHERE model IN (SELECT model FROM selected_models)
          AND category IN (SELECT category FROM selected_categories);
    "#
}
