// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `l1viz inspect` command: summary figures and the row table.
//!
//! The table mirrors the companion view the original host displayed under
//! each chart: all rows sorted by operation id, with the derived end
//! address alongside the raw columns.

use std::path::PathBuf;
use timeline_core::{AxisRange, TimelineRow};
use viz_pipeline::{build_timeline, VizConfig};

pub fn execute(trace: PathBuf, config: VizConfig, limit: usize) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             l1viz · Trace Inspector                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let view = build_timeline(&trace, &config)
        .map_err(|e| anyhow::anyhow!("failed to build timeline from '{}': {e}", trace.display()))?;

    // ── Summary ────────────────────────────────────────────────
    let summary = view.summary();
    println!("  Trace: {}", trace.display());
    println!("  Buffer rows: {}", summary.num_rows);
    println!(
        "  Operation buffers address range: {} to {}",
        summary.address_min, summary.end_address_max,
    );
    println!(
        "  Operations with buffers ID range: {} to {}",
        summary.operation_id_min, summary.operation_id_max,
    );
    println!("  Total allocated: {} bytes", summary.total_bytes);
    println!();

    // ── Axis & pagination ──────────────────────────────────────
    let axis = view.axis();
    println!(
        "  Axis: {} → {} ({} ticks, step {})",
        AxisRange::tick_label(axis.min_tick),
        AxisRange::tick_label(axis.max_tick),
        axis.num_ticks(),
        axis.step,
    );
    println!(
        "  Chunks: {} of up to {} rows each",
        view.num_chunks(),
        view.chunk_size(),
    );
    println!();

    // ── Row table ──────────────────────────────────────────────
    let mut rows: Vec<&TimelineRow> = view.timeline().rows().iter().collect();
    rows.sort_by_key(|r| r.allocation.operation_id);

    println!(
        "  {:>8} {:<30} {:>12} {:>12} {:>12}",
        "Op", "Name", "Address", "Size", "End",
    );
    println!("  {}", "-".repeat(80));

    for row in rows.iter().take(limit) {
        let a = &row.allocation;
        println!(
            "  {:>8} {:<30} {:>12} {:>12} {:>12}",
            a.operation_id,
            super::truncate(&row.operation_name, 30),
            a.address,
            a.size,
            a.end_address(),
        );
    }
    if rows.len() > limit {
        println!("  … {} more rows (raise --limit to see them)", rows.len() - limit);
    }

    Ok(())
}
