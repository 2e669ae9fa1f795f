// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # viz-pipeline
//!
//! Orchestrates the buffer-allocation visualization pipeline:
//!
//! ```text
//! trace-store          timeline-core                  host
//! ───────────          ─────────────                  ────
//! TraceLoader ──rows──▶ LayoutBuilder ──▶ Paginator ──▶ RenderAdapter
//!                          │                 │  per chunk:
//!                          ▼                 ▼
//!                      AxisRange      InteractionIndex
//! ```
//!
//! Each stage fully consumes its input before the next begins; the run is
//! single-threaded and synchronous. The only work that may happen off this
//! flow is rendering itself, owned by the host's [`RenderAdapter`] — the
//! pipeline never depends on it for correctness.
//!
//! # Key Components
//!
//! - [`VizConfig`] — chunk size and tick parameters, TOML-loadable,
//!   validated before any I/O.
//! - [`VizPipeline`] — type-state driver (`Idle → Loaded → Ready`).
//! - [`TimelineView`] — the finished view; windows chunks on demand and
//!   drives adapters via [`TimelineView::render_all`].
//! - [`RenderAdapter`] / [`RenderContext`] — the renderer contract. The
//!   core consumes adapters; it never implements one.
//! - [`build_timeline`] — the one-call entry point.

mod config;
mod error;
mod pipeline;
mod render;

pub use config::VizConfig;
pub use error::PipelineError;
pub use pipeline::{build_timeline, Idle, Loaded, PipelineState, Ready, TimelineView, VizPipeline};
pub use render::{RenderAdapter, RenderContext};
