// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Derives the canonical timeline ordering and the shared axis range.
//!
//! The builder is purely algorithmic — no I/O — making it trivially
//! unit-testable against hand-built rows.

use crate::{AxisRange, Chunk, Paginator, TimelineError, TimelineRow, TimelineSummary};
use crate::axis::{DEFAULT_TICK_MARGIN, DEFAULT_TICK_STEP};

/// Turns raw joined rows into a [`MemoryTimeline`] plus its [`AxisRange`].
///
/// Steps:
/// 1. Validate every row (negative address/size rejects the whole load).
/// 2. Stable-sort ascending by address; ties keep original row order.
/// 3. Derive the axis range from the lowest address and highest end address.
#[derive(Debug, Clone, Copy)]
pub struct LayoutBuilder {
    tick_step: i64,
    tick_margin: i64,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self {
            tick_step: DEFAULT_TICK_STEP,
            tick_margin: DEFAULT_TICK_MARGIN,
        }
    }
}

impl LayoutBuilder {
    /// Builder with the default tick step and margin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with explicit tick parameters.
    pub fn with_ticks(tick_step: i64, tick_margin: i64) -> Result<Self, TimelineError> {
        // Reuse the axis-range validation so the rules live in one place.
        AxisRange::from_bounds(0, 0, tick_step, tick_margin)?;
        Ok(Self {
            tick_step,
            tick_margin,
        })
    }

    /// Consumes raw rows and emits the sorted timeline and its axis.
    pub fn build(
        &self,
        mut rows: Vec<TimelineRow>,
    ) -> Result<(MemoryTimeline, AxisRange), TimelineError> {
        if rows.is_empty() {
            return Err(TimelineError::EmptyTimeline);
        }

        for row in &rows {
            row.allocation.validate()?;
        }

        // sort_by_key is stable: equal addresses keep their input order.
        rows.sort_by_key(|r| r.allocation.address);

        let min_address = rows[0].allocation.address;
        let max_end = rows
            .iter()
            .map(|r| r.allocation.end_address())
            .max()
            .expect("rows is non-empty");

        let axis = AxisRange::from_bounds(min_address, max_end, self.tick_step, self.tick_margin)?;
        let timeline = MemoryTimeline { rows };

        tracing::info!("{}", timeline.summary());

        Ok((timeline, axis))
    }
}

/// The full allocation sequence, sorted ascending by address.
///
/// Immutable once built: every accessor borrows, and chunking only windows
/// the row slice. The timeline owns its rows for the whole visualization
/// session; memory use is bounded only by input size.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MemoryTimeline {
    rows: Vec<TimelineRow>,
}

impl MemoryTimeline {
    /// All rows in canonical order.
    pub fn rows(&self) -> &[TimelineRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Windows the timeline into chunks of at most `chunk_size` rows.
    pub fn chunks(&self, chunk_size: usize) -> Result<Vec<Chunk<'_>>, TimelineError> {
        Paginator::new(chunk_size)?.paginate(self)
    }

    /// Checks the ordering and derived-field invariants.
    ///
    /// Construction guarantees both; this exists so downstream stages can
    /// assert them cheaply after handoffs.
    pub fn validate(&self) -> Result<(), TimelineError> {
        for row in &self.rows {
            row.allocation.validate()?;
        }
        for pair in self.rows.windows(2) {
            if pair[0].allocation.address > pair[1].allocation.address {
                return Err(TimelineError::InvalidRecord {
                    operation_id: pair[1].allocation.operation_id,
                    detail: format!(
                        "timeline order violated: address {} follows {}",
                        pair[1].allocation.address, pair[0].allocation.address,
                    ),
                });
            }
        }
        Ok(())
    }

    /// Aggregate figures over the whole timeline.
    pub fn summary(&self) -> TimelineSummary {
        TimelineSummary::from_rows(&self.rows)
    }
}
