// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The capture service hosts invoke from their event dispatch.

use std::sync::Arc;
use tracing::warn;

use crate::dispatch::ResolverFactory;
use crate::error::{AuditError, AuditResult};
use crate::event::AuditEvent;
use crate::sink::AuditSink;

/// Resolves each incoming event and persists the finished record.
///
/// Stateless across calls: one event in, one record out (or none). Sink
/// failures are logged and, outside strict mode, never propagate to the
/// operation being audited.
pub struct AuditLogger {
	factory: ResolverFactory,
	sinks: Vec<Arc<dyn AuditSink>>,
}

impl AuditLogger {
	pub fn new(factory: ResolverFactory, sinks: Vec<Arc<dyn AuditSink>>) -> Self {
		Self { factory, sinks }
	}

	pub fn factory(&self) -> &ResolverFactory {
		&self.factory
	}

	/// Handle one event. Returns whether a record was produced.
	pub fn handle(&self, event: &dyn AuditEvent, event_name: &str) -> AuditResult<bool> {
		let Some(record) = self.factory.event_log(event, event_name)? else {
			return Ok(false);
		};

		for sink in &self.sinks {
			if let Err(source) = sink.save(record.clone()) {
				warn!(sink = sink.name(), error = %source, "audit sink save failed");

				if self.factory.config().strict {
					return Err(AuditError::Sink {
						sink: sink.name().to_string(),
						source,
					});
				}
			}
		}

		Ok(true)
	}
}
