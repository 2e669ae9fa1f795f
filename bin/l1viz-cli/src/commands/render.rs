// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `l1viz render` command: draw the chunked timeline as text bars.
//!
//! This is the host side of the renderer contract: the core hands each
//! chunk over with a prebuilt interaction index, and all labels shown here
//! are resolved through that index, never by reaching into ambient state.

use std::path::PathBuf;
use timeline_core::{AxisRange, Chunk, InteractionIndex};
use viz_pipeline::{build_timeline, RenderAdapter, RenderContext, VizConfig};

/// Width of the bar lane in characters.
const BAR_WIDTH: usize = 64;

pub fn execute(
    trace: PathBuf,
    mut config: VizConfig,
    chunk_size: Option<usize>,
    tick_step: Option<i64>,
    chunk: Option<usize>,
) -> anyhow::Result<()> {
    if let Some(size) = chunk_size {
        config.chunk_size = size;
    }
    if let Some(step) = tick_step {
        config.tick_step = step;
    }

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            l1viz · Buffer Timeline Renderer         ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let view = build_timeline(&trace, &config)
        .map_err(|e| anyhow::anyhow!("failed to build timeline from '{}': {e}", trace.display()))?;

    println!("  {}", view.summary());
    let axis = view.axis();
    println!(
        "  Axis: {} → {} ({} ticks, step {})",
        AxisRange::tick_label(axis.min_tick),
        AxisRange::tick_label(axis.max_tick),
        axis.num_ticks(),
        axis.step,
    );
    println!();

    let mut renderer = TextRenderer::new(BAR_WIDTH);
    let pages = view
        .render_all(&mut renderer, "L1 Buffer Utilization")
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    tracing::debug!("rendered {} pages", pages.len());

    match chunk {
        Some(i) => {
            let page = pages.get(i).ok_or_else(|| {
                anyhow::anyhow!("chunk {i} out of range: {} chunks available", pages.len())
            })?;
            println!("{page}");
        }
        None => {
            for page in &pages {
                println!("{page}");
            }
        }
    }

    Ok(())
}

/// Renders one chunk as a block of address-scaled text bars.
pub struct TextRenderer {
    width: usize,
}

impl TextRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    fn bar_lane(&self, axis: AxisRange, address: i64, end_address: i64) -> String {
        let span = axis.span().max(1);
        let scale = |v: i64| -> usize {
            let col = (v - axis.min_tick) * self.width as i64 / span;
            col.clamp(0, self.width as i64) as usize
        };

        let start = scale(address);
        let end = scale(end_address);
        let mut lane = vec![' '; self.width];
        if end_address == address {
            // Zero-width allocation: a marker, not a bar.
            if start < self.width {
                lane[start] = '·';
            }
        } else {
            let end = end.max(start + 1).min(self.width);
            for cell in &mut lane[start..end] {
                *cell = '█';
            }
        }
        lane.into_iter().collect()
    }
}

impl RenderAdapter for TextRenderer {
    type Artifact = String;
    type Error = std::convert::Infallible;

    fn name(&self) -> &str {
        "text-bars"
    }

    fn render(
        &mut self,
        ctx: &RenderContext,
        chunk: &Chunk<'_>,
        index: &InteractionIndex,
    ) -> Result<String, Self::Error> {
        let mut out = String::new();
        out.push_str(&format!(
            "  ── {} · {}  [chunk {}/{}] ──\n",
            ctx.title,
            chunk.caption(),
            ctx.chunk_number + 1,
            ctx.total_chunks,
        ));

        for (position, row) in chunk.rows().iter().enumerate() {
            let label = index.label(position).unwrap_or("?");
            let a = &row.allocation;
            out.push_str(&format!(
                "  {:>6} {:<24} |{}| {}..{}\n",
                a.operation_id,
                super::truncate(label, 24),
                self.bar_lane(ctx.axis, a.address, a.end_address()),
                a.address,
                a.end_address(),
            ));
        }
        Ok(out)
    }
}
