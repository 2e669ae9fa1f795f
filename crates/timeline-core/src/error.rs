// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for timeline construction.

/// Errors that can occur while building or windowing a timeline.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// The trace produced no rows; there is nothing to render and no
    /// meaningful axis. Reported distinctly so a host can show "no data"
    /// instead of a generic failure.
    #[error("trace contains no buffer rows to lay out")]
    EmptyTimeline,

    /// A row carries a negative address or size. Raw traces should never
    /// contain these; refusing the whole load beats mis-rendering it.
    #[error("invalid record for operation {operation_id}: {detail}")]
    InvalidRecord { operation_id: i64, detail: String },

    /// A configuration value (chunk size, tick step, tick margin) is out of
    /// range. Raised before any work is done.
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },
}
