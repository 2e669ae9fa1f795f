// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the visualization pipeline.

use timeline_core::TimelineError;
use trace_store::StoreError;

/// Errors surfaced by the pipeline driver.
///
/// Every category is fatal for the run: the input is a static snapshot, so
/// nothing is retried, and nothing is swallowed.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Configuration rejected before any I/O.
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// The trace snapshot could not be opened or read.
    #[error("trace load failed: {0}")]
    Store(#[from] StoreError),

    /// Layout, pagination, or record validation failed.
    #[error("timeline construction failed: {0}")]
    Timeline(#[from] TimelineError),

    /// A renderer rejected a chunk.
    #[error("renderer '{adapter}' failed on chunk {chunk}: {detail}")]
    RenderFailed {
        adapter: String,
        chunk: usize,
        detail: String,
    },
}
