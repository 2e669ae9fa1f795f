// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for trace snapshot access.

/// Errors that can occur when opening or reading a trace snapshot.
///
/// All of these are fatal: the snapshot is a static file, so there is
/// nothing transient worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The snapshot file could not be opened.
    #[error("cannot open trace '{path}': {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A required table is absent from the snapshot.
    #[error("trace is missing required table '{table}'")]
    MissingTable { table: String },

    /// A required column is absent from a table.
    #[error("table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    /// A query against the snapshot failed.
    #[error("trace query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),
}
