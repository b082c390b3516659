//! In-memory SQLite session database for LLM benchmark observations.
//!
//! A session loads one validated dataset into an in-memory SQLite database
//! and exposes typed query methods for the aggregation and ranking views.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in a
//!   single-threaded session
//! - Observations are loaded once; the model/category selection can be
//!   replaced at any time and every query re-reads the
//!   `filtered_observations` view, so nothing derived is cached
//! - Typed query methods return serializable structs from [`models`]
//!
//! # Usage
//!
//! ```rust
//! use cai_bench::sample::sample_dataset;
//! use cai_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_observations(&sample_dataset().observations).unwrap();
//!
//! let stats = db.query_model_size_stats().unwrap();
//! assert_eq!(stats.len(), 1);
//! assert_eq!(stats[0].count, 3);
//! ```

pub mod schema;
mod loader;
mod queries;
mod selection;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding one session's observations.
///
/// Cheaply cloneable (via `Rc`); clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use
    /// [`load_observations`](Self::load_observations) to populate it.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
