// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persistence collaborators.
//!
//! The pipeline does not define a storage format; finished records are
//! handed off to an [`AuditSink`] and ownership transfers with them.

use std::sync::{Mutex, PoisonError};
use tracing::info;

use crate::error::AuditSinkError;
use crate::record::AuditRecord;

pub trait AuditSink: Send + Sync {
	fn name(&self) -> &str;

	fn save(&self, record: AuditRecord) -> Result<(), AuditSinkError>;
}

/// Emits every record as a structured `tracing` event. Useful as a default
/// sink when no host persistence is wired up.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
	fn name(&self) -> &str {
		"tracing"
	}

	fn save(&self, record: AuditRecord) -> Result<(), AuditSinkError> {
		info!(
			type_id = %record.type_id,
			kind = %record.kind,
			level = %record.level,
			description = %record.description,
			"audit event"
		);
		Ok(())
	}
}

/// Buffers records in memory for inspection. Used by tests and by hosts that
/// flush in batches.
#[derive(Debug, Default)]
pub struct MemorySink {
	records: Mutex<Vec<AuditRecord>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn records(&self) -> Vec<AuditRecord> {
		self.records
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	pub fn len(&self) -> usize {
		self.records
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl AuditSink for MemorySink {
	fn name(&self) -> &str {
		"memory"
	}

	fn save(&self, record: AuditRecord) -> Result<(), AuditSinkError> {
		self.records
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(record);
		Ok(())
	}
}
