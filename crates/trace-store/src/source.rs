// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Read-only handle to a trace snapshot with schema validation.

use crate::StoreError;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Tables and columns every snapshot must provide.
const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("operations", &["operation_id", "name"]),
    ("buffers", &["operation_id", "address", "max_size_per_bank"]),
];

/// A validated, read-only handle to a trace snapshot.
///
/// Opening a source checks the schema up front, so every later query can
/// assume the tables and columns exist. The snapshot is never written to.
#[derive(Debug)]
pub struct TraceSource {
    conn: Connection,
}

impl TraceSource {
    /// Opens a snapshot file read-only and validates its schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| StoreError::OpenFailed {
                path: path.display().to_string(),
                source: e,
            })?;
        tracing::debug!("opened trace '{}'", path.display());
        Self::from_connection(conn)
    }

    /// Wraps an existing connection after validating its schema.
    ///
    /// Useful for testing with in-memory databases.
    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let source = Self { conn };
        source.validate_schema()?;
        Ok(source)
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Counts the raw (pre-join) buffer rows in the snapshot.
    pub fn count_buffers(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT count(*) FROM buffers", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Checks that every required table and column is present.
    fn validate_schema(&self) -> Result<(), StoreError> {
        for &(table, columns) in REQUIRED_SCHEMA {
            let exists: i64 = self.conn.query_row(
                "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Err(StoreError::MissingTable {
                    table: table.to_string(),
                });
            }

            let found = self.column_names(table)?;
            for &column in columns {
                if !found.iter().any(|c| c == column) {
                    return Err(StoreError::MissingColumn {
                        table: table.to_string(),
                        column: column.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Lists the column names of a table.
    ///
    /// `table` comes from [`REQUIRED_SCHEMA`], never from user input.
    fn column_names(&self, table: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info('{table}')"))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_schema_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE operations (operation_id INTEGER PRIMARY KEY, name TEXT);
             CREATE TABLE buffers (operation_id INTEGER, address INTEGER, max_size_per_bank INTEGER);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_valid_schema_accepted() {
        let source = TraceSource::from_connection(empty_schema_connection()).unwrap();
        assert_eq!(source.count_buffers().unwrap(), 0);
    }

    #[test]
    fn test_missing_table_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE operations (operation_id INTEGER PRIMARY KEY, name TEXT);",
        )
        .unwrap();
        let err = TraceSource::from_connection(conn).unwrap_err();
        assert!(matches!(err, StoreError::MissingTable { table } if table == "buffers"));
    }

    #[test]
    fn test_missing_column_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE operations (operation_id INTEGER PRIMARY KEY, name TEXT);
             CREATE TABLE buffers (operation_id INTEGER, address INTEGER);",
        )
        .unwrap();
        let err = TraceSource::from_connection(conn).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingColumn { table, column }
                if table == "buffers" && column == "max_size_per_bank"
        ));
    }

    #[test]
    fn test_open_nonexistent_file() {
        let err = TraceSource::open(Path::new("/nonexistent/trace.sqlite")).unwrap_err();
        assert!(matches!(err, StoreError::OpenFailed { .. }));
    }
}
