// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # timeline-core
//!
//! The renderable memory-timeline model and the transformations that
//! produce it from raw trace rows.
//!
//! ```text
//! Vec<TimelineRow>                 (joined loader output)
//!       │  LayoutBuilder::build
//!       ▼
//! MemoryTimeline + AxisRange       (sorted by address, shared tick range)
//!       │  Paginator::paginate
//!       ▼
//! Vec<Chunk>                       (fixed-size index windows)
//!       │  InteractionIndex::from_chunk        (per chunk)
//!       ▼
//! position → operation name        (O(1) hover/selection resolution)
//! ```
//!
//! # Key Components
//!
//! - [`BufferAllocation`] — one memory region; `end_address()` is derived
//!   from `address + size`, never stored, so the invariant cannot drift.
//! - [`MemoryTimeline`] — the full allocation sequence, stable-sorted
//!   ascending by address. Immutable once built.
//! - [`AxisRange`] — tick boundaries shared by every chunk, so all rendered
//!   views use one consistent address axis.
//! - [`Chunk`] — a borrowed index window over the timeline; windowing never
//!   copies or reorders rows.
//! - [`InteractionIndex`] — an owned, immutable position → operation-name
//!   table built per chunk before rendering, replacing the stale-closure
//!   hover callbacks of the original tooling.
//!
//! # Ownership Model
//!
//! The timeline owns its rows for the whole visualization session. Chunks
//! borrow slices of it; interaction indexes own their labels so they stay
//! valid for exactly as long as the rendered chunk needs them. Nothing is
//! mutated after [`LayoutBuilder::build`] returns.

mod allocation;
mod axis;
mod chunk;
mod error;
mod interact;
mod layout;
mod summary;

pub use allocation::{BufferAllocation, TimelineRow};
pub use axis::{AxisRange, DEFAULT_TICK_MARGIN, DEFAULT_TICK_STEP};
pub use chunk::{Chunk, OperationGroup, Paginator, DEFAULT_CHUNK_SIZE};
pub use error::TimelineError;
pub use interact::InteractionIndex;
pub use layout::{LayoutBuilder, MemoryTimeline};
pub use summary::TimelineSummary;
