// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Buffer allocation records and the joined timeline row.

use crate::TimelineError;
use serde::ser::SerializeStruct;

/// A contiguous memory region owned by one operation.
///
/// `end_address` is always `address + size`. It is exposed only as a derived
/// accessor — there is no stored field to fall out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferAllocation {
    /// Identity of the owning operation.
    pub operation_id: i64,
    /// Start address of the region. Never negative in a valid record.
    pub address: i64,
    /// Size of the region in bytes. Zero-sized allocations are valid.
    pub size: i64,
}

impl BufferAllocation {
    /// One past the last address of the region.
    pub fn end_address(&self) -> i64 {
        self.address + self.size
    }

    /// Returns `true` for zero-width allocations.
    pub fn is_zero_sized(&self) -> bool {
        self.size == 0
    }

    /// Rejects records with a negative address or size.
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.address < 0 {
            return Err(TimelineError::InvalidRecord {
                operation_id: self.operation_id,
                detail: format!("negative address {}", self.address),
            });
        }
        if self.size < 0 {
            return Err(TimelineError::InvalidRecord {
                operation_id: self.operation_id,
                detail: format!("negative size {}", self.size),
            });
        }
        Ok(())
    }
}

// Serialized output carries `end_address` so downstream renderers see the
// same row shape the trace tooling emitted.
impl serde::Serialize for BufferAllocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("BufferAllocation", 4)?;
        s.serialize_field("operation_id", &self.operation_id)?;
        s.serialize_field("address", &self.address)?;
        s.serialize_field("size", &self.size)?;
        s.serialize_field("end_address", &self.end_address())?;
        s.end()
    }
}

/// A [`BufferAllocation`] joined with its owning operation's name.
///
/// The element type of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TimelineRow {
    pub allocation: BufferAllocation,
    pub operation_name: String,
}

impl TimelineRow {
    pub fn new(allocation: BufferAllocation, operation_name: impl Into<String>) -> Self {
        Self {
            allocation,
            operation_name: operation_name.into(),
        }
    }
}
