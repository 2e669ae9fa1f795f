// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # l1viz
//!
//! Command-line interface for the L1 buffer utilization visualizer.
//!
//! ## Usage
//! ```bash
//! # Render the paginated timeline as text bars
//! l1viz render ./trace.sqlite
//!
//! # Render a single chunk at a custom page size
//! l1viz render ./trace.sqlite --chunk-size 25 --chunk 2
//!
//! # Summary figures and the row table
//! l1viz inspect ./trace.sqlite --limit 40
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "l1viz",
    about = "Memory-buffer allocation timeline visualizer",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI flags override it).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the chunked timeline as text bars against the shared axis.
    Render {
        /// Path to the SQLite trace snapshot.
        trace: std::path::PathBuf,

        /// Rows per rendered chunk (default 50).
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Spacing between address-axis ticks (default 100000).
        #[arg(long)]
        tick_step: Option<i64>,

        /// Render only this chunk (0-based) instead of all of them.
        #[arg(long)]
        chunk: Option<usize>,
    },

    /// Print summary figures and the row table, sorted by operation id.
    Inspect {
        /// Path to the SQLite trace snapshot.
        trace: std::path::PathBuf,

        /// Maximum number of table rows to print.
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            trace,
            chunk_size,
            tick_step,
            chunk,
        } => commands::render::execute(trace, config, chunk_size, tick_step, chunk),
        Commands::Inspect { trace, limit } => commands::inspect::execute(trace, config, limit),
    }
}
