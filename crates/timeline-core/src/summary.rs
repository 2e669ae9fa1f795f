// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Aggregate figures over a timeline, for display beneath the rendered view.

use crate::TimelineRow;

/// Whole-timeline figures: row count, address span, operation-id span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TimelineSummary {
    /// Total number of buffer rows.
    pub num_rows: usize,
    /// Lowest buffer start address.
    pub address_min: i64,
    /// Highest buffer end address.
    pub end_address_max: i64,
    /// Lowest operation id with at least one buffer.
    pub operation_id_min: i64,
    /// Highest operation id with at least one buffer.
    pub operation_id_max: i64,
    /// Sum of all buffer sizes.
    pub total_bytes: i64,
}

impl TimelineSummary {
    /// Computes the figures from rows. Zeroed out for an empty slice,
    /// though layout building rejects that case earlier.
    pub(crate) fn from_rows(rows: &[TimelineRow]) -> Self {
        if rows.is_empty() {
            return Self {
                num_rows: 0,
                address_min: 0,
                end_address_max: 0,
                operation_id_min: 0,
                operation_id_max: 0,
                total_bytes: 0,
            };
        }
        let mut summary = Self {
            num_rows: rows.len(),
            address_min: i64::MAX,
            end_address_max: i64::MIN,
            operation_id_min: i64::MAX,
            operation_id_max: i64::MIN,
            total_bytes: 0,
        };
        for row in rows {
            let a = &row.allocation;
            summary.address_min = summary.address_min.min(a.address);
            summary.end_address_max = summary.end_address_max.max(a.end_address());
            summary.operation_id_min = summary.operation_id_min.min(a.operation_id);
            summary.operation_id_max = summary.operation_id_max.max(a.operation_id);
            summary.total_bytes += a.size;
        }
        summary
    }
}

impl std::fmt::Display for TimelineSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} buffer rows, addresses {} to {}, operations {} to {}, {} bytes total",
            self.num_rows,
            self.address_min,
            self.end_address_max,
            self.operation_id_min,
            self.operation_id_max,
            self.total_bytes,
        )
    }
}
