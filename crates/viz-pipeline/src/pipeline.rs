// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The type-state pipeline driver.
//!
//! ```text
//! VizPipeline<Idle>
//!     │  .load_trace()        (or .load_from_source() in tests)
//!     ▼
//! VizPipeline<Loaded>
//!     │  .build_layout()
//!     ▼
//! VizPipeline<Ready>
//!     │  .into_view()
//!     ▼
//!   TimelineView              (owns timeline + axis, windows chunks)
//! ```
//!
//! Each transition consumes the old value and returns a new one, so an
//! out-of-order stage sequence is a compile error. Configuration is
//! validated when the pipeline is created — before any I/O — so a bad
//! chunk size never opens the trace file.

use crate::{PipelineError, RenderAdapter, RenderContext, VizConfig};
use timeline_core::{
    AxisRange, BufferAllocation, Chunk, InteractionIndex, LayoutBuilder, MemoryTimeline,
    TimelineRow, TimelineSummary,
};
use trace_store::{JoinedRow, LoadOptions, TraceLoader, TraceSource};
use std::marker::PhantomData;
use std::path::Path;

// ── Type-state markers ─────────────────────────────────────────

/// Pipeline is configured but no trace is loaded.
#[derive(Debug)]
pub struct Idle;

/// Joined rows are loaded, layout not yet derived.
#[derive(Debug)]
pub struct Loaded;

/// Timeline and axis are built; chunks can be produced.
#[derive(Debug)]
pub struct Ready;

/// Sealed trait for pipeline states.
pub trait PipelineState: std::fmt::Debug {}
impl PipelineState for Idle {}
impl PipelineState for Loaded {}
impl PipelineState for Ready {}

// ── Driver ─────────────────────────────────────────────────────

/// Sequences loader → layout → pagination over one trace snapshot.
///
/// # Example
/// ```no_run
/// use viz_pipeline::{VizConfig, VizPipeline};
/// use std::path::Path;
///
/// # fn example() -> Result<(), viz_pipeline::PipelineError> {
/// let view = VizPipeline::new(VizConfig::default())?
///     .load_trace(Path::new("./trace.sqlite"))?
///     .build_layout()?
///     .into_view();
/// println!("{} chunks", view.num_chunks());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct VizPipeline<S: PipelineState = Idle> {
    config: VizConfig,
    _state: PhantomData<S>,
    // Fields populated as the pipeline moves through states:
    rows: Option<Vec<JoinedRow>>,
    timeline: Option<MemoryTimeline>,
    axis: Option<AxisRange>,
}

// ── Idle → Loaded ──────────────────────────────────────────────

impl VizPipeline<Idle> {
    /// Creates a pipeline, validating the configuration before any I/O.
    pub fn new(config: VizConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        tracing::info!(
            "pipeline created: chunk_size={}, tick_step={}",
            config.chunk_size,
            config.tick_step,
        );
        Ok(Self {
            config,
            _state: PhantomData,
            rows: None,
            timeline: None,
            axis: None,
        })
    }

    /// Opens the snapshot and loads the joined rows.
    /// Transitions to the `Loaded` state.
    pub fn load_trace(self, path: &Path) -> Result<VizPipeline<Loaded>, PipelineError> {
        let source = TraceSource::open(path)?;
        self.load_from_source(&source)
    }

    /// Loads from an already-open source.
    ///
    /// Useful for testing with in-memory databases.
    pub fn load_from_source(
        self,
        source: &TraceSource,
    ) -> Result<VizPipeline<Loaded>, PipelineError> {
        let options = LoadOptions {
            name_prefix_len: self.config.name_prefix_len,
        };
        let rows = TraceLoader::load_with(source, &options)?;
        Ok(VizPipeline {
            config: self.config,
            _state: PhantomData,
            rows: Some(rows),
            timeline: None,
            axis: None,
        })
    }
}

// ── Loaded → Ready ─────────────────────────────────────────────

impl VizPipeline<Loaded> {
    /// Number of joined rows waiting for layout.
    pub fn num_rows(&self) -> usize {
        self.rows.as_ref().expect("rows must exist in Loaded state").len()
    }

    /// Derives the sorted timeline and shared axis.
    /// Transitions to the `Ready` state.
    pub fn build_layout(self) -> Result<VizPipeline<Ready>, PipelineError> {
        let raw = self.rows.expect("rows must exist in Loaded state");
        let rows: Vec<TimelineRow> = raw
            .into_iter()
            .map(|r| {
                TimelineRow::new(
                    BufferAllocation {
                        operation_id: r.operation_id,
                        address: r.address,
                        size: r.size,
                    },
                    r.operation_name,
                )
            })
            .collect();

        let builder = LayoutBuilder::with_ticks(self.config.tick_step, self.config.tick_margin)?;
        let (timeline, axis) = builder.build(rows)?;
        timeline.validate()?;

        Ok(VizPipeline {
            config: self.config,
            _state: PhantomData,
            rows: None,
            timeline: Some(timeline),
            axis: Some(axis),
        })
    }
}

// ── Ready ──────────────────────────────────────────────────────

impl VizPipeline<Ready> {
    pub fn timeline(&self) -> &MemoryTimeline {
        self.timeline
            .as_ref()
            .expect("timeline must exist in Ready state")
    }

    pub fn axis(&self) -> AxisRange {
        self.axis.expect("axis must exist in Ready state")
    }

    /// Consumes the pipeline into a [`TimelineView`] for rendering.
    pub fn into_view(self) -> TimelineView {
        TimelineView {
            timeline: self.timeline.expect("timeline must exist in Ready state"),
            axis: self.axis.expect("axis must exist in Ready state"),
            chunk_size: self.config.chunk_size,
        }
    }
}

/// Builds the complete renderable view of one trace snapshot.
///
/// The single entry point most hosts need: configuration validation, load,
/// layout, and chunking in one call.
pub fn build_timeline(path: &Path, config: &VizConfig) -> Result<TimelineView, PipelineError> {
    Ok(VizPipeline::new(config.clone())?
        .load_trace(path)?
        .build_layout()?
        .into_view())
}

// ── View ───────────────────────────────────────────────────────

/// The finished product of the pipeline: the timeline, the shared axis,
/// and on-demand chunk windows.
///
/// Chunks borrow the timeline, so no chunk-to-chunk state exists beyond
/// the common [`AxisRange`]; each chunk plus its interaction index can be
/// handed to concurrent renderers without locking. The reference flow
/// renders them sequentially via [`render_all`](Self::render_all).
#[derive(Debug, Clone)]
pub struct TimelineView {
    timeline: MemoryTimeline,
    axis: AxisRange,
    chunk_size: usize,
}

impl TimelineView {
    pub fn timeline(&self) -> &MemoryTimeline {
        &self.timeline
    }

    pub fn axis(&self) -> AxisRange {
        self.axis
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Windows the timeline into chunks.
    pub fn chunks(&self) -> Vec<Chunk<'_>> {
        self.timeline
            .chunks(self.chunk_size)
            .expect("chunk size validated at configuration time")
    }

    pub fn num_chunks(&self) -> usize {
        self.timeline.len().div_ceil(self.chunk_size)
    }

    /// Aggregate figures over the whole timeline.
    pub fn summary(&self) -> TimelineSummary {
        self.timeline.summary()
    }

    /// Renders every chunk through the adapter, in order.
    ///
    /// Each chunk's [`InteractionIndex`] is fully built *before* the
    /// adapter is invoked — never lazily during event handling — so a
    /// rendered view can outlive the chunk list that produced it.
    pub fn render_all<A: RenderAdapter>(
        &self,
        adapter: &mut A,
        title: &str,
    ) -> Result<Vec<A::Artifact>, PipelineError> {
        let chunks = self.chunks();
        let total = chunks.len();
        let mut artifacts = Vec::with_capacity(total);

        for (i, chunk) in chunks.iter().enumerate() {
            let index = InteractionIndex::from_chunk(chunk);
            let ctx = RenderContext {
                title: title.to_string(),
                chunk_number: i,
                total_chunks: total,
                axis: self.axis,
            };
            let artifact = adapter.render(&ctx, chunk, &index).map_err(|e| {
                PipelineError::RenderFailed {
                    adapter: adapter.name().to_string(),
                    chunk: i,
                    detail: e.to_string(),
                }
            })?;
            artifacts.push(artifact);
        }

        tracing::info!("rendered {total} chunks via '{}'", adapter.name());
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingAdapter;
    use rusqlite::Connection;
    use timeline_core::TimelineError;

    fn memory_source(ops: &[(i64, &str)], buffers: &[(i64, i64, i64)]) -> TraceSource {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE operations (operation_id INTEGER PRIMARY KEY, name TEXT);
             CREATE TABLE buffers (operation_id INTEGER, address INTEGER, max_size_per_bank INTEGER);",
        )
        .unwrap();
        for &(id, name) in ops {
            conn.execute(
                "INSERT INTO operations VALUES (?1, ?2)",
                rusqlite::params![id, name],
            )
            .unwrap();
        }
        for &(op, addr, size) in buffers {
            conn.execute(
                "INSERT INTO buffers VALUES (?1, ?2, ?3)",
                rusqlite::params![op, addr, size],
            )
            .unwrap();
        }
        TraceSource::from_connection(conn).unwrap()
    }

    fn view_of(
        ops: &[(i64, &str)],
        buffers: &[(i64, i64, i64)],
        config: VizConfig,
    ) -> Result<TimelineView, PipelineError> {
        let source = memory_source(ops, buffers);
        Ok(VizPipeline::new(config)?
            .load_from_source(&source)?
            .build_layout()?
            .into_view())
    }

    #[test]
    fn test_end_to_end_two_rows() {
        // Already ascending: one chunk, order preserved, ends derived.
        let view = view_of(
            &[(1, "add"), (2, "mul")],
            &[(1, 1000, 500), (2, 1600, 200)],
            VizConfig::default(),
        )
        .unwrap();

        assert_eq!(view.num_chunks(), 1);
        let chunks = view.chunks();
        let rows = chunks[0].rows();
        assert_eq!(rows[0].operation_name, "add");
        assert_eq!(rows[0].allocation.end_address(), 1500);
        assert_eq!(rows[1].allocation.end_address(), 1800);
    }

    #[test]
    fn test_end_to_end_chunking() {
        // 120 rows at the default chunk size → 50, 50, 20.
        let ops: Vec<(i64, String)> = (0..120).map(|i| (i as i64, format!("op_{i}"))).collect();
        let ops_ref: Vec<(i64, &str)> = ops.iter().map(|(i, n)| (*i, n.as_str())).collect();
        let buffers: Vec<(i64, i64, i64)> =
            (0..120).map(|i| (i as i64, (i as i64) * 1000, 512)).collect();

        let view = view_of(&ops_ref, &buffers, VizConfig::default()).unwrap();
        let chunks = view.chunks();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 50);
        assert_eq!(chunks[2].len(), 20);
    }

    #[test]
    fn test_empty_trace_reports_empty_timeline() {
        let err = view_of(&[], &[], VizConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Timeline(TimelineError::EmptyTimeline)
        ));
    }

    #[test]
    fn test_orphaned_buffer_excluded_without_error() {
        let view = view_of(
            &[(1, "add")],
            &[(1, 1000, 500), (99, 2000, 100)],
            VizConfig::default(),
        )
        .unwrap();
        assert_eq!(view.timeline().len(), 1);
        assert!(view
            .timeline()
            .rows()
            .iter()
            .all(|r| r.allocation.operation_id == 1));
    }

    #[test]
    fn test_zero_chunk_size_fails_before_io() {
        let config = VizConfig {
            chunk_size: 0,
            ..Default::default()
        };
        // Rejected at construction: no source is ever opened.
        let err = VizPipeline::new(config).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn test_render_all_builds_index_per_chunk() {
        let ops: Vec<(i64, String)> = (0..7).map(|i| (i as i64, format!("op_{i}"))).collect();
        let ops_ref: Vec<(i64, &str)> = ops.iter().map(|(i, n)| (*i, n.as_str())).collect();
        let buffers: Vec<(i64, i64, i64)> =
            (0..7).map(|i| (i as i64, (i as i64) * 64, 32)).collect();
        let config = VizConfig {
            chunk_size: 3,
            ..Default::default()
        };
        let view = view_of(&ops_ref, &buffers, config).unwrap();

        let mut adapter = RecordingAdapter::new();
        let artifacts = view.render_all(&mut adapter, "test view").unwrap();

        assert_eq!(artifacts, vec![3, 3, 1]);
        // Every call saw an index sized exactly to its chunk.
        assert_eq!(adapter.seen, vec![(0, 3, 3), (1, 3, 3), (2, 1, 1)]);
    }

    #[test]
    fn test_name_prefix_applied_through_pipeline() {
        let config = VizConfig {
            name_prefix_len: 6,
            ..Default::default()
        };
        let view = view_of(&[(1, "ttnn::add")], &[(1, 0, 16)], config).unwrap();
        assert_eq!(view.timeline().rows()[0].operation_name, "add");
    }

    #[test]
    fn test_negative_size_fails_layout() {
        let err = view_of(&[(1, "bad")], &[(1, 100, -4)], VizConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Timeline(TimelineError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_axis_shared_across_chunks() {
        let ops: Vec<(i64, String)> = (0..4).map(|i| (i as i64, format!("op_{i}"))).collect();
        let ops_ref: Vec<(i64, &str)> = ops.iter().map(|(i, n)| (*i, n.as_str())).collect();
        let buffers: Vec<(i64, i64, i64)> = vec![
            (0, 100, 50),
            (1, 200_000, 1000),
            (2, 400_000, 1000),
            (3, 600_000, 1000),
        ];
        let config = VizConfig {
            chunk_size: 2,
            ..Default::default()
        };
        let view = view_of(&ops_ref, &buffers, config).unwrap();

        let mut adapter = RecordingAdapter::new();
        view.render_all(&mut adapter, "shared axis").unwrap();
        // One axis for the run, bracketing the full address span.
        assert_eq!(view.axis().min_tick, 100 - 100_000);
        assert_eq!(view.axis().max_tick, 601_000);
    }
}
