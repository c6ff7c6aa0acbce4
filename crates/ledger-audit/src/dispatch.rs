// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolver dispatch and record assembly.
//!
//! [`ResolverFactory`] is the entry point of the capture pipeline: it picks
//! the strategy for an incoming event, normalizes the strategy's output into
//! an [`AuditRecord`], and layers contextual enrichment on top. One event in,
//! one record out (or none), synchronously.
//!
//! Strictness is decided in exactly one place ([`ResolverFactory::recover`]):
//! strict mode surfaces configuration mistakes early, production mode never
//! lets audit logging crash the operation it is observing.

use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::changeset::ChangeProbe;
use crate::config::AuditConfig;
use crate::context::{project_property, text_value, ActorProvider, RequestContext};
use crate::error::{AuditError, AuditResult};
use crate::event::AuditEvent;
use crate::record::AuditRecord;
use crate::resolver::{
	CommonResolver, EntityChangeResolver, EventResolver, ResolvedInfo, ResolverRegistry,
};

pub struct ResolverFactory {
	config: AuditConfig,
	entity_resolver: EntityChangeResolver,
	common_resolver: CommonResolver,
	registry: ResolverRegistry,
	request: Option<Arc<dyn RequestContext>>,
	actors: Option<Arc<dyn ActorProvider>>,
}

impl ResolverFactory {
	pub fn new(config: AuditConfig, registry: ResolverRegistry, probe: ChangeProbe) -> Self {
		let entity_resolver = EntityChangeResolver::new(&config, probe);

		Self {
			config,
			entity_resolver,
			common_resolver: CommonResolver,
			registry,
			request: None,
			actors: None,
		}
	}

	pub fn with_request_context(mut self, request: Arc<dyn RequestContext>) -> Self {
		self.request = Some(request);
		self
	}

	pub fn with_actor_provider(mut self, actors: Arc<dyn ActorProvider>) -> Self {
		self.actors = Some(actors);
		self
	}

	pub fn config(&self) -> &AuditConfig {
		&self.config
	}

	/// Resolve an event into a finished record, or `None` when the event is
	/// not audited.
	pub fn event_log(
		&self,
		event: &dyn AuditEvent,
		event_name: &str,
	) -> AuditResult<Option<AuditRecord>> {
		let Some(info) = self.event_log_info(event, event_name)? else {
			return Ok(None);
		};

		let Some(mut record) = self.record_from_info(info)? else {
			return Ok(None);
		};

		record.type_id = event_name.to_string();

		if let Some(request) = &self.request {
			record.ip = request.client_ip();
			record.port = request.port();
			record.host = request.host();
			record.user_agent = request.user_agent();
		}

		record.event_time = Some(Utc::now());

		self.assign_actor(&mut record);
		self.apply_static_fields(&mut record)?;

		Ok(Some(record))
	}

	/// Strategy selection: embedded log info wins, then the lifecycle table,
	/// then registered custom resolvers, then the common fallback.
	fn event_log_info(
		&self,
		event: &dyn AuditEvent,
		event_name: &str,
	) -> AuditResult<Option<ResolvedInfo>> {
		if let Some(info) = event.embedded_log_info(event_name) {
			return Ok(Some(info));
		}

		if self.config.is_lifecycle_event(event_name) {
			return Ok(Some(self.entity_resolver.resolve(event, event_name)?));
		}

		if let Some(service_id) = self.config.custom_resolvers.get(event_name) {
			let Some(resolver) = self.registry.get(service_id) else {
				return self.recover(AuditError::InvalidService {
					event: event_name.to_string(),
					service: service_id.clone(),
				});
			};

			return Ok(Some(resolver.resolve(event, event_name)?));
		}

		Ok(Some(self.common_resolver.resolve(event, event_name)?))
	}

	fn record_from_info(&self, info: ResolvedInfo) -> AuditResult<Option<AuditRecord>> {
		match info {
			ResolvedInfo::Skip => Ok(None),
			ResolvedInfo::Record(record) => Ok(Some(record)),
			ResolvedInfo::Fields(fields) if fields.is_empty() => Ok(None),
			ResolvedInfo::Fields(fields) => match AuditRecord::from_fields(&fields) {
				Ok(record) => Ok(Some(record)),
				// Severity is a closed set; silent coercion would corrupt
				// downstream filtering.
				Err(err @ AuditError::InvalidLevel(_)) => Err(err),
				Err(err) => self.recover(err),
			},
		}
	}

	fn assign_actor(&self, record: &mut AuditRecord) {
		let actor = self.actors.as_ref().and_then(|p| p.current_actor());

		let Some(actor) = actor else {
			record.user = Some(Value::String(self.config.anonymous_label.clone()));
			return;
		};

		record.user = match &self.config.user_property {
			None => Some(actor.clone()),
			Some(property) => project_property(&actor, property),
		};

		if let Some(property) = &self.config.email_property {
			record.email = project_property(&actor, property).map(text_value);
		}
	}

	/// Static fields go on last so they override anything set earlier,
	/// including resolver output.
	fn apply_static_fields(&self, record: &mut AuditRecord) -> AuditResult<()> {
		for (name, value) in &self.config.static_fields {
			if let Err(err) = record.set_field(name, value.clone()) {
				match err {
					err @ AuditError::InvalidLevel(_) => return Err(err),
					err if self.config.strict => return Err(err),
					err => warn!(field = %name, error = %err, "static field skipped"),
				}
			}
		}

		Ok(())
	}

	fn recover<T>(&self, err: AuditError) -> AuditResult<Option<T>> {
		if self.config.strict {
			Err(err)
		} else {
			warn!(error = %err, "audit resolution degraded, event not recorded");
			Ok(None)
		}
	}
}
