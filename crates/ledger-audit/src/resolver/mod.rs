// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolver strategies.
//!
//! Every strategy implements the same contract: given an event and its name,
//! produce [`ResolvedInfo`]: a fully built record, a raw field map for the
//! dispatch layer to normalize, or a signal to skip the event entirely.

pub mod entity;

pub use entity::EntityChangeResolver;

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AuditResult;
use crate::event::AuditEvent;
use crate::record::{AuditRecord, FieldMap};

/// The outcome of a resolver strategy.
#[derive(Debug, Clone)]
pub enum ResolvedInfo {
	/// A complete record; the dispatch layer uses it as-is.
	Record(AuditRecord),
	/// Raw fields; the dispatch layer deserializes them into a record.
	Fields(FieldMap),
	/// The event is not audit-worthy; produce nothing.
	Skip,
}

pub trait EventResolver: Send + Sync {
	fn resolve(&self, event: &dyn AuditEvent, event_name: &str) -> AuditResult<ResolvedInfo>;
}

/// Fallback strategy for events nothing else claims: passes the event name
/// through as both description and type.
#[derive(Debug, Clone, Default)]
pub struct CommonResolver;

impl EventResolver for CommonResolver {
	fn resolve(&self, _event: &dyn AuditEvent, event_name: &str) -> AuditResult<ResolvedInfo> {
		let mut fields = FieldMap::new();
		fields.insert("description".to_string(), Value::String(event_name.to_string()));
		fields.insert("type".to_string(), Value::String(event_name.to_string()));

		Ok(ResolvedInfo::Fields(fields))
	}
}

/// Custom resolver services keyed by service id.
///
/// Configuration maps event names to service ids; the dispatch layer looks
/// the service up here at resolution time. An id with no registered service
/// is a configuration error, handled per strictness mode.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
	services: HashMap<String, Arc<dyn EventResolver>>,
}

impl ResolverRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(
		&mut self,
		service_id: impl Into<String>,
		resolver: Arc<dyn EventResolver>,
	) -> &mut Self {
		self.services.insert(service_id.into(), resolver);
		self
	}

	pub fn get(&self, service_id: &str) -> Option<&Arc<dyn EventResolver>> {
		self.services.get(service_id)
	}
}
