// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI subcommands and shared helpers.

pub mod inspect;
pub mod render;

use std::path::Path;
use viz_pipeline::VizConfig;

/// Initializes tracing based on the `-v` count.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the TOML config if a path was given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<VizConfig> {
    match path {
        Some(p) => VizConfig::from_file(p)
            .map_err(|e| anyhow::anyhow!("failed to load config '{}': {e}", p.display())),
        None => Ok(VizConfig::default()),
    }
}

/// Truncates a name for fixed-width table columns.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
