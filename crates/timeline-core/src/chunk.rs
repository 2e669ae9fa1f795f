// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-size windows over the sorted timeline.
//!
//! A single view cannot legibly show thousands of operations, so the
//! timeline is split into chunks for rendering. Chunks are index windows:
//! they borrow the timeline's rows and never copy or reorder them.

use crate::{MemoryTimeline, TimelineError, TimelineRow};

/// Default number of rows per rendered chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Splits a timeline into contiguous, exhaustive chunks.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    chunk_size: usize,
}

impl Paginator {
    /// Creates a paginator, rejecting a zero chunk size before any work.
    pub fn new(chunk_size: usize) -> Result<Self, TimelineError> {
        if chunk_size == 0 {
            return Err(TimelineError::InvalidConfig {
                detail: "chunk size must be at least 1".to_string(),
            });
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Windows the timeline into `ceil(len / chunk_size)` chunks.
    ///
    /// Concatenating the chunks' rows in order reproduces the timeline
    /// exactly once; the final chunk may be shorter than `chunk_size`.
    pub fn paginate<'a>(
        &self,
        timeline: &'a MemoryTimeline,
    ) -> Result<Vec<Chunk<'a>>, TimelineError> {
        let rows = timeline.rows();
        let chunks = rows
            .chunks(self.chunk_size)
            .enumerate()
            .map(|(i, window)| {
                let start_index = i * self.chunk_size;
                Chunk {
                    start_index,
                    end_index: start_index + window.len(),
                    rows: window,
                }
            })
            .collect();
        Ok(chunks)
    }
}

/// One rendered page of the timeline: rows `start_index..end_index`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Chunk<'a> {
    /// Timeline index of the first row in this chunk.
    pub start_index: usize,
    /// One past the timeline index of the last row.
    pub end_index: usize,
    rows: &'a [TimelineRow],
}

impl<'a> Chunk<'a> {
    /// The rows of this chunk, in timeline order.
    pub fn rows(&self) -> &'a [TimelineRow] {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Caption over the operation ids this chunk covers, e.g. `"Ops 3-41"`.
    pub fn caption(&self) -> String {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => format!(
                "Ops {}-{}",
                first.allocation.operation_id, last.allocation.operation_id,
            ),
            _ => "Ops (none)".to_string(),
        }
    }

    /// Groups this chunk's rows by owning operation, in order of first
    /// appearance. An operation whose buffers interleave with another's
    /// still gets a single group, the way a stacked-bar view draws one bar
    /// per operation.
    pub fn group_by_operation(&self) -> Vec<OperationGroup<'a>> {
        let mut groups: Vec<OperationGroup<'a>> = Vec::new();
        for row in self.rows {
            match groups
                .iter_mut()
                .find(|g| g.operation_id == row.allocation.operation_id)
            {
                Some(group) => group.rows.push(row),
                None => groups.push(OperationGroup {
                    operation_id: row.allocation.operation_id,
                    operation_name: &row.operation_name,
                    rows: vec![row],
                }),
            }
        }
        groups
    }
}

/// All of one operation's rows within a chunk.
#[derive(Debug, Clone)]
pub struct OperationGroup<'a> {
    pub operation_id: i64,
    pub operation_name: &'a str,
    pub rows: Vec<&'a TimelineRow>,
}

impl OperationGroup<'_> {
    /// Total bytes this operation occupies within the chunk.
    pub fn total_bytes(&self) -> i64 {
        self.rows.iter().map(|r| r.allocation.size).sum()
    }
}
