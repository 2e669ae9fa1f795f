// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-chunk lookup from rendered-element position to operation name.
//!
//! The original tooling resolved hover events through closures that
//! captured "the current chunk" — replaced or re-rendered chunks left those
//! closures pointing at stale data. The index makes the mapping an explicit,
//! chunk-scoped, immutable table: built once before the renderer runs,
//! queried in O(1), discarded with the chunk.

use crate::{Chunk, OperationGroup};

/// Immutable mapping: rendered position (0-based, render order) → operation
/// name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct InteractionIndex {
    labels: Vec<String>,
}

impl InteractionIndex {
    /// Index for a chunk rendered row-by-row: position `i` resolves to
    /// `rows[i].operation_name`.
    pub fn from_chunk(chunk: &Chunk<'_>) -> Self {
        Self {
            labels: chunk
                .rows()
                .iter()
                .map(|r| r.operation_name.clone())
                .collect(),
        }
    }

    /// Index for a chunk rendered as per-operation groups: every stacked
    /// segment of a group resolves to the same operation name.
    pub fn from_groups(groups: &[OperationGroup<'_>]) -> Self {
        Self {
            labels: groups
                .iter()
                .flat_map(|g| g.rows.iter().map(|_| g.operation_name.to_string()))
                .collect(),
        }
    }

    /// Index over an arbitrary render order supplied by the adapter.
    pub fn from_render_order<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolves a rendered position to its operation name.
    pub fn label(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }

    /// Number of rendered positions this index covers.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferAllocation, LayoutBuilder, MemoryTimeline, TimelineRow};

    fn sample_timeline() -> MemoryTimeline {
        let rows = vec![
            TimelineRow::new(
                BufferAllocation { operation_id: 1, address: 0, size: 8 },
                "add",
            ),
            TimelineRow::new(
                BufferAllocation { operation_id: 2, address: 8, size: 8 },
                "mul",
            ),
            TimelineRow::new(
                BufferAllocation { operation_id: 2, address: 16, size: 8 },
                "mul",
            ),
            TimelineRow::new(
                BufferAllocation { operation_id: 3, address: 24, size: 8 },
                "relu",
            ),
        ];
        LayoutBuilder::new().build(rows).unwrap().0
    }

    #[test]
    fn test_round_trip_over_chunk_rows() {
        let t = sample_timeline();
        let chunks = t.chunks(50).unwrap();
        let index = InteractionIndex::from_chunk(&chunks[0]);

        assert_eq!(index.len(), chunks[0].len());
        for (p, row) in chunks[0].rows().iter().enumerate() {
            assert_eq!(index.label(p), Some(row.operation_name.as_str()));
        }
    }

    #[test]
    fn test_out_of_range_position() {
        let t = sample_timeline();
        let chunks = t.chunks(50).unwrap();
        let index = InteractionIndex::from_chunk(&chunks[0]);
        assert_eq!(index.label(chunks[0].len()), None);
    }

    #[test]
    fn test_stacked_segments_resolve_to_same_operation() {
        let t = sample_timeline();
        let chunks = t.chunks(50).unwrap();
        let groups = chunks[0].group_by_operation();
        let index = InteractionIndex::from_groups(&groups);

        // Render order: add, mul, mul, relu — both mul segments must map
        // back to the one operation.
        assert_eq!(index.label(1), Some("mul"));
        assert_eq!(index.label(2), Some("mul"));
        assert_eq!(index.label(3), Some("relu"));
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_explicit_render_order() {
        let index = InteractionIndex::from_render_order(["b", "a", "b"]);
        assert_eq!(index.label(0), Some("b"));
        assert_eq!(index.label(1), Some("a"));
        assert_eq!(index.label(2), Some("b"));
    }

    #[test]
    fn test_index_survives_chunk_replacement() {
        // The index owns its labels: dropping the chunk list leaves the
        // lookup intact for the already-rendered view.
        let t = sample_timeline();
        let index = {
            let chunks = t.chunks(2).unwrap();
            InteractionIndex::from_chunk(&chunks[0])
        };
        assert_eq!(index.label(0), Some("add"));
    }
}
