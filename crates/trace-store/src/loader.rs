// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Joins the `buffers` and `operations` tables into flat rows.
//!
//! The join is the only query the visualizer needs: one row per buffer,
//! annotated with the owning operation's name. Ordering and derived fields
//! are the layout stage's concern, not the loader's — rows come out in
//! whatever order SQLite returns them.

use crate::{StoreError, TraceSource};
use std::path::Path;

/// The fixed inner join. Buffers without a matching operation drop out here.
const JOIN_QUERY: &str = "\
    SELECT buffers.operation_id, operations.name AS operation_name, \
           buffers.address, buffers.max_size_per_bank \
    FROM buffers \
    JOIN operations ON buffers.operation_id = operations.operation_id";

/// A buffer row joined with its owning operation's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRow {
    /// Identity of the owning operation.
    pub operation_id: i64,
    /// Descriptive name of the owning operation (not guaranteed unique).
    pub operation_name: String,
    /// Start address of the buffer.
    pub address: i64,
    /// Size of the buffer in bytes (`max_size_per_bank` in the snapshot).
    pub size: i64,
}

/// Options applied while loading.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Number of leading characters to strip from each operation name.
    ///
    /// Trace tooling prefixes names with a fixed-width namespace tag; the
    /// visualizer historically trimmed it for display. `0` keeps names as-is.
    pub name_prefix_len: usize,
}

/// Loads joined buffer rows from a snapshot.
///
/// # Example
/// ```no_run
/// use trace_store::TraceLoader;
/// use std::path::Path;
///
/// let rows = TraceLoader::load(Path::new("./trace.sqlite")).unwrap();
/// for row in &rows {
///     println!("{} @ {}+{}", row.operation_name, row.address, row.size);
/// }
/// ```
pub struct TraceLoader;

impl TraceLoader {
    /// Opens a snapshot file and loads all joined rows with default options.
    pub fn load(path: &Path) -> Result<Vec<JoinedRow>, StoreError> {
        let source = TraceSource::open(path)?;
        Self::load_from(&source)
    }

    /// Loads all joined rows from an already-opened source.
    pub fn load_from(source: &TraceSource) -> Result<Vec<JoinedRow>, StoreError> {
        Self::load_with(source, &LoadOptions::default())
    }

    /// Loads all joined rows, applying the given options.
    pub fn load_with(
        source: &TraceSource,
        options: &LoadOptions,
    ) -> Result<Vec<JoinedRow>, StoreError> {
        let total_buffers = source.count_buffers()?;

        let mut stmt = source.connection().prepare(JOIN_QUERY)?;
        let mapped = stmt.query_map([], |row| {
            Ok(JoinedRow {
                operation_id: row.get(0)?,
                operation_name: row.get(1)?,
                address: row.get(2)?,
                size: row.get(3)?,
            })
        })?;

        let mut rows = Vec::new();
        for row in mapped {
            let mut row = row?;
            if options.name_prefix_len > 0 {
                row.operation_name = strip_prefix_chars(&row.operation_name, options.name_prefix_len);
            }
            rows.push(row);
        }

        // The inner join silently drops orphaned buffers. Keep that behavior,
        // but make the drop visible.
        let dropped = total_buffers.saturating_sub(rows.len());
        if dropped > 0 {
            tracing::warn!(
                "{dropped} buffer rows reference no operation and were dropped by the join"
            );
        }
        tracing::info!("loaded {} joined buffer rows", rows.len());

        Ok(rows)
    }
}

/// Strips the first `n` characters (not bytes) from a name.
fn strip_prefix_chars(name: &str, n: usize) -> String {
    match name.char_indices().nth(n) {
        Some((idx, _)) => name[idx..].to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn memory_source(ops: &[(i64, &str)], buffers: &[(i64, i64, i64)]) -> TraceSource {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE operations (operation_id INTEGER PRIMARY KEY, name TEXT);
             CREATE TABLE buffers (operation_id INTEGER, address INTEGER, max_size_per_bank INTEGER);",
        )
        .unwrap();
        for &(id, name) in ops {
            conn.execute(
                "INSERT INTO operations VALUES (?1, ?2)",
                rusqlite::params![id, name],
            )
            .unwrap();
        }
        for &(op, addr, size) in buffers {
            conn.execute(
                "INSERT INTO buffers VALUES (?1, ?2, ?3)",
                rusqlite::params![op, addr, size],
            )
            .unwrap();
        }
        TraceSource::from_connection(conn).unwrap()
    }

    #[test]
    fn test_load_joined_rows() {
        let source = memory_source(
            &[(1, "add"), (2, "mul")],
            &[(1, 1000, 500), (2, 1600, 200)],
        );
        let rows = TraceLoader::load_from(&source).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].operation_name, "add");
        assert_eq!(rows[1].address, 1600);
        assert_eq!(rows[1].size, 200);
    }

    #[test]
    fn test_orphaned_buffer_dropped() {
        // Buffer referencing operation 99 has no match and must vanish
        // without an error.
        let source = memory_source(&[(1, "add")], &[(1, 1000, 500), (99, 2000, 100)]);
        let rows = TraceLoader::load_from(&source).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|r| r.operation_id == 1));
    }

    #[test]
    fn test_empty_tables_yield_no_rows() {
        let source = memory_source(&[], &[]);
        let rows = TraceLoader::load_from(&source).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_one_operation_many_buffers() {
        let source = memory_source(
            &[(7, "conv")],
            &[(7, 0, 64), (7, 64, 64), (7, 128, 64)],
        );
        let rows = TraceLoader::load_from(&source).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.operation_name == "conv"));
    }

    #[test]
    fn test_name_prefix_trim() {
        let source = memory_source(&[(1, "ttnn::add")], &[(1, 0, 16)]);
        let options = LoadOptions { name_prefix_len: 6 };
        let rows = TraceLoader::load_with(&source, &options).unwrap();
        assert_eq!(rows[0].operation_name, "add");
    }

    #[test]
    fn test_name_prefix_trim_longer_than_name() {
        let source = memory_source(&[(1, "add")], &[(1, 0, 16)]);
        let options = LoadOptions { name_prefix_len: 10 };
        let rows = TraceLoader::load_with(&source, &options).unwrap();
        assert_eq!(rows[0].operation_name, "");
    }
}
