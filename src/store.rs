//! The single SQLite connection shared by a run.
//!
//! A [`Store`] is opened once and handed explicitly to the schema builder,
//! the file ingestor and the report. [`Store::close`] consumes it, so the
//! connection cannot be used after it has been closed.

use std::path::Path;

use log::debug;
use rusqlite::Connection;

use crate::error::{IngestError, Result};

pub const DEFAULT_DATABASE: &str = "bookstore.db";

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(IngestError::Connection)?;
        debug!("Opened database {path:?}");
        Ok(Self { conn })
    }

    /// Open an in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(IngestError::Connection)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                rusqlite::params![table],
                |row| row.get(0),
            )
            .map_err(IngestError::Query)?;
        Ok(count > 0)
    }

    /// Column names and declared types, in definition order.
    pub fn table_columns(&self, table: &str) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")
            .map_err(IngestError::Query)?;
        let rows = stmt
            .query_map(rusqlite::params![table], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(IngestError::Query)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(IngestError::Query)
    }

    pub fn row_count(&self, table: &str) -> Result<usize> {
        // `table` must already have passed identifier validation.
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .map_err(IngestError::Query)?;
        Ok(count as usize)
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| IngestError::Close(err))
    }
}
