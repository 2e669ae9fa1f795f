// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # trace-store
//!
//! Reads buffer-allocation trace snapshots captured from a hardware/compiler
//! run. A snapshot is a static SQLite file with two tables:
//!
//! - `operations(operation_id INTEGER PRIMARY KEY, name TEXT)`
//! - `buffers(operation_id INTEGER, address INTEGER, max_size_per_bank INTEGER)`
//!
//! The loader joins the two into flat [`JoinedRow`]s — one per buffer, each
//! carrying its owning operation's name. Buffer rows that reference a
//! non-existent operation are dropped by the inner join; the loader logs the
//! dropped count but does not fail, matching the recorded trace tooling's
//! behavior.
//!
//! # Example
//! ```no_run
//! use trace_store::TraceLoader;
//! use std::path::Path;
//!
//! let rows = TraceLoader::load(Path::new("./trace.sqlite")).unwrap();
//! println!("loaded {} buffer rows", rows.len());
//! ```

mod error;
mod loader;
mod source;

pub use error::StoreError;
pub use loader::{JoinedRow, LoadOptions, TraceLoader};
pub use source::TraceSource;
