// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Runs the full pipeline over a synthetic in-memory trace and prints
//! what a renderer would receive.
//!
//! ```bash
//! cargo run --example synthetic_trace -p viz-pipeline
//! ```

use timeline_core::{AxisRange, Chunk, InteractionIndex};
use trace_store::TraceSource;
use viz_pipeline::{RenderAdapter, RenderContext, VizConfig, VizPipeline};

/// Minimal adapter: one summary line per chunk.
struct CaptionRenderer;

impl RenderAdapter for CaptionRenderer {
    type Artifact = String;
    type Error = std::convert::Infallible;

    fn name(&self) -> &str {
        "caption"
    }

    fn render(
        &mut self,
        ctx: &RenderContext,
        chunk: &Chunk<'_>,
        index: &InteractionIndex,
    ) -> Result<String, Self::Error> {
        let first_label = index.label(0).unwrap_or("(empty)");
        Ok(format!(
            "[{}/{}] {} — {} rows, first element resolves to '{}'",
            ctx.chunk_number + 1,
            ctx.total_chunks,
            chunk.caption(),
            chunk.len(),
            first_label,
        ))
    }
}

fn synthetic_source() -> TraceSource {
    let conn = rusqlite::Connection::open_in_memory().expect("in-memory db");
    conn.execute_batch(
        "CREATE TABLE operations (operation_id INTEGER PRIMARY KEY, name TEXT);
         CREATE TABLE buffers (operation_id INTEGER, address INTEGER, max_size_per_bank INTEGER);",
    )
    .expect("schema");

    let names = ["matmul", "add", "softmax", "layernorm", "relu"];
    for i in 0..130i64 {
        conn.execute(
            "INSERT INTO operations VALUES (?1, ?2)",
            rusqlite::params![i, format!("{}_{i}", names[(i % 5) as usize])],
        )
        .expect("insert operation");
        conn.execute(
            "INSERT INTO buffers VALUES (?1, ?2, ?3)",
            rusqlite::params![i, (i * 7919) % 1_048_576, 2048 + (i % 7) * 512],
        )
        .expect("insert buffer");
    }
    TraceSource::from_connection(conn).expect("valid schema")
}

fn main() -> Result<(), viz_pipeline::PipelineError> {
    let source = synthetic_source();

    let view = VizPipeline::new(VizConfig::default())?
        .load_from_source(&source)?
        .build_layout()?
        .into_view();

    println!("{}", view.summary());

    let axis = view.axis();
    println!(
        "axis: {} ticks from {} to {}, step {}",
        axis.num_ticks(),
        AxisRange::tick_label(axis.min_tick),
        AxisRange::tick_label(axis.max_tick),
        axis.step,
    );
    println!();

    let mut renderer = CaptionRenderer;
    for line in view.render_all(&mut renderer, "synthetic trace")? {
        println!("{line}");
    }

    Ok(())
}
