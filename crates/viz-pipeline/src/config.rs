// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pipeline configuration loaded from TOML files or constructed
//! programmatically.
//!
//! The values here were hardcoded constants in the original trace tooling;
//! they are defaults now, but the defaults reproduce its output exactly.
//!
//! # TOML Format
//! ```toml
//! chunk_size = 50
//! tick_step = 100000
//! tick_margin = 100000
//! name_prefix_len = 0
//! ```

use std::path::Path;
use timeline_core::{DEFAULT_CHUNK_SIZE, DEFAULT_TICK_MARGIN, DEFAULT_TICK_STEP};

/// Configuration for one visualization run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct VizConfig {
    /// Rows per rendered chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Spacing between address-axis ticks.
    #[serde(default = "default_tick_step")]
    pub tick_step: i64,
    /// Margin subtracted below the lowest address for the first tick.
    #[serde(default = "default_tick_margin")]
    pub tick_margin: i64,
    /// Leading characters stripped from operation names at load time
    /// (`0` keeps names untouched).
    #[serde(default)]
    pub name_prefix_len: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_tick_step() -> i64 {
    DEFAULT_TICK_STEP
}

fn default_tick_margin() -> i64 {
    DEFAULT_TICK_MARGIN
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            tick_step: DEFAULT_TICK_STEP,
            tick_margin: DEFAULT_TICK_MARGIN,
            name_prefix_len: 0,
        }
    }
}

impl VizConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::PipelineError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::PipelineError::InvalidConfig(format!(
                "cannot read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::PipelineError> {
        toml::from_str(toml_str)
            .map_err(|e| super::PipelineError::InvalidConfig(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::PipelineError> {
        toml::to_string_pretty(self)
            .map_err(|e| super::PipelineError::InvalidConfig(format!("TOML serialise error: {e}")))
    }

    /// Rejects out-of-range values. Runs before any I/O, so a bad
    /// configuration never touches the trace file.
    pub fn validate(&self) -> Result<(), super::PipelineError> {
        if self.chunk_size == 0 {
            return Err(super::PipelineError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if self.tick_step < 1 {
            return Err(super::PipelineError::InvalidConfig(format!(
                "tick_step must be at least 1, got {}",
                self.tick_step
            )));
        }
        if self.tick_margin < 0 {
            return Err(super::PipelineError::InvalidConfig(format!(
                "tick_margin must not be negative, got {}",
                self.tick_margin
            )));
        }
        Ok(())
    }
}
