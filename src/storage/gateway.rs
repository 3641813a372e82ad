//! SQLite gateway for the infractions table.
//!
//! # Responsibilities
//! - Create the table on startup (idempotent)
//! - Insert, list, filter by plate, delete by id
//!
//! # Design Decisions
//! - A fresh connection per call, closed when the call returns
//! - Inserts run in a transaction; dropping it uncommitted rolls back
//! - Ordering by timestamp is lexical, timestamps are never parsed

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, params_from_iter, Connection};

use crate::config::StorageConfig;
use crate::storage::error::Result;
use crate::storage::model::{Infraction, NewInfraction};

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS infractions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        plate TEXT NOT NULL,
        speed REAL NOT NULL,
        timestamp TEXT NOT NULL
    )";

const INSERT: &str = "INSERT INTO infractions (plate, speed, timestamp) VALUES (?1, ?2, ?3)";

const SELECT_ALL: &str =
    "SELECT id, plate, speed, timestamp FROM infractions ORDER BY timestamp DESC";

const SELECT_BY_PLATE: &str =
    "SELECT id, plate, speed, timestamp FROM infractions WHERE plate = ?1";

const DELETE_BY_ID: &str = "DELETE FROM infractions WHERE id = ?1";

/// Handle on the database file. Cheap to clone; holds no connection.
#[derive(Debug, Clone)]
pub struct Gateway {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Gateway {
    /// Gateway over the database file at `path`, failing fast when locked.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::ZERO,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.database_path)
            .with_busy_timeout(Duration::from_millis(config.busy_timeout_ms))
    }

    /// How long a statement waits on a locked database before failing.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// Create the infractions table if it does not exist yet.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(CREATE_TABLE)?;
        Ok(())
    }

    /// Insert a record and return its generated id.
    pub fn insert(&self, infraction: &NewInfraction) -> Result<i64> {
        let params = infraction.params()?;
        let mut conn = self.connect()?;

        let tx = conn.transaction()?;
        tx.execute(INSERT, params_from_iter(params.iter()))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    /// All records, newest timestamp first.
    pub fn list_all(&self) -> Result<Vec<Infraction>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let rows = stmt
            .query_map([], Infraction::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Records whose plate matches exactly (case-sensitive).
    pub fn list_by_plate(&self, plate: &str) -> Result<Vec<Infraction>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_BY_PLATE)?;
        let rows = stmt
            .query_map(params![plate], Infraction::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Remove the record with `id`. Returns whether it existed.
    pub fn delete_by_id(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let removed = conn.execute(DELETE_BY_ID, params![id])?;
        Ok(removed > 0)
    }
}
