// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Incoming events at the capture boundary.
//!
//! An event is an opaque object; its name travels alongside it. Two hooks
//! drive dispatch: entity-lifecycle events expose the affected entity's
//! snapshot, and events may embed their own resolution to bypass strategy
//! lookup entirely.

use serde::Serialize;
use serde_json::Value;

use crate::error::AuditResult;
use crate::introspect::EntitySnapshot;
use crate::resolver::ResolvedInfo;

pub trait AuditEvent: Send + Sync {
	/// The affected entity for entity-lifecycle events.
	fn entity(&self) -> Option<&EntitySnapshot> {
		None
	}

	/// Events that self-describe their resolution return it here; the
	/// dispatch layer then skips strategy lookup.
	fn embedded_log_info(&self, event_name: &str) -> Option<ResolvedInfo> {
		let _ = event_name;
		None
	}
}

/// An entity-lifecycle event: creation, update or removal of a persisted
/// domain object.
pub struct EntityChangeEvent {
	snapshot: EntitySnapshot,
}

impl EntityChangeEvent {
	/// Capture the affected entity at event construction time.
	pub fn capture<T: Serialize>(entity: &T) -> AuditResult<Self> {
		Ok(Self {
			snapshot: EntitySnapshot::capture(entity)?,
		})
	}

	pub fn from_snapshot(snapshot: EntitySnapshot) -> Self {
		Self { snapshot }
	}
}

impl AuditEvent for EntityChangeEvent {
	fn entity(&self) -> Option<&EntitySnapshot> {
		Some(&self.snapshot)
	}
}

/// An application-defined event with an optional JSON payload for custom
/// resolvers to pick apart.
#[derive(Debug, Clone, Default)]
pub struct GenericEvent {
	payload: Option<Value>,
}

impl GenericEvent {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_payload(payload: Value) -> Self {
		Self {
			payload: Some(payload),
		}
	}

	pub fn payload(&self) -> Option<&Value> {
		self.payload.as_ref()
	}
}

impl AuditEvent for GenericEvent {}
