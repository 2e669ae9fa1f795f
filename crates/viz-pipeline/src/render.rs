// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The renderer contract.
//!
//! The core never draws anything. A host supplies a [`RenderAdapter`]; the
//! driver hands it one chunk at a time together with a fully built
//! [`InteractionIndex`] and an explicit [`RenderContext`]. There is no
//! ambient figure or axes object mutated across calls — everything a
//! renderer may depend on arrives as an argument.

use timeline_core::{AxisRange, Chunk, InteractionIndex};

/// Per-call rendering context, owned by the driver and threaded through
/// every [`RenderAdapter::render`] invocation.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Title of the overall view.
    pub title: String,
    /// 0-based position of the current chunk.
    pub chunk_number: usize,
    /// Total number of chunks in this run.
    pub total_chunks: usize,
    /// The axis shared by all chunks of the run.
    pub axis: AxisRange,
}

/// A collaborator that turns one chunk into a visual artifact.
///
/// Adapters receive the interaction index fully built — label resolution
/// must never depend on state that outlives the call, so replacing or
/// re-rendering a chunk cannot leave a stale lookup behind.
pub trait RenderAdapter {
    /// Whatever the adapter produces: an image, a text block, a widget id.
    type Artifact;
    /// Adapter-specific failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Human-readable name of this adapter.
    fn name(&self) -> &str;

    /// Renders one chunk.
    fn render(
        &mut self,
        ctx: &RenderContext,
        chunk: &Chunk<'_>,
        index: &InteractionIndex,
    ) -> Result<Self::Artifact, Self::Error>;
}
