// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolver strategy for entity-lifecycle events.

use serde_json::Value;
use std::collections::HashMap;

use crate::changeset::{ChangeProbe, ChangeStatus};
use crate::config::AuditConfig;
use crate::error::AuditResult;
use crate::event::AuditEvent;
use crate::introspect::EntitySnapshot;
use crate::record::FieldMap;
use crate::resolver::{EventResolver, ResolvedInfo};

/// Resolves entity create/update/remove events into a description and type
/// derived from the entity itself.
///
/// Update events with an empty change set are suppressed: a no-op update is
/// not audit-worthy.
pub struct EntityChangeResolver {
	candidate_fields: Vec<String>,
	lifecycle_verbs: HashMap<String, String>,
	probe: ChangeProbe,
}

impl EntityChangeResolver {
	pub fn new(config: &AuditConfig, probe: ChangeProbe) -> Self {
		Self {
			candidate_fields: config.candidate_fields.clone(),
			lifecycle_verbs: config.lifecycle_verbs.clone(),
			probe,
		}
	}

	fn short_verb(&self, event_name: &str) -> Option<&str> {
		self.lifecycle_verbs.get(event_name).map(String::as_str)
	}

	/// `"<Type> has been <verb>"`, extended with the identifying field when
	/// one exists, e.g. `Order has been updated with name = "X"`.
	fn description(&self, snapshot: &EntitySnapshot, verb: &str) -> String {
		match snapshot.identifying_field(&self.candidate_fields) {
			Some(field) => format!(
				"{} has been {} with {} = \"{}\"",
				snapshot.type_name(),
				verb,
				field,
				snapshot.field_display(field)
			),
			None => format!("{} has been {}", snapshot.type_name(), verb),
		}
	}
}

impl EventResolver for EntityChangeResolver {
	fn resolve(&self, event: &dyn AuditEvent, event_name: &str) -> AuditResult<ResolvedInfo> {
		let Some(snapshot) = event.entity() else {
			return Ok(ResolvedInfo::Skip);
		};

		let Some(verb) = self.short_verb(event_name) else {
			return Ok(ResolvedInfo::Skip);
		};

		if self.probe.status(verb, snapshot) == ChangeStatus::Unchanged {
			return Ok(ResolvedInfo::Skip);
		}

		let mut fields = FieldMap::new();
		fields.insert(
			"description".to_string(),
			Value::String(self.description(snapshot, verb)),
		);
		fields.insert(
			"type".to_string(),
			Value::String(format!("{} {}", snapshot.type_name(), verb)),
		);

		Ok(ResolvedInfo::Fields(fields))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::changeset::{ChangeSet, ChangeTracker, FieldChange};
	use crate::config::{ENTITY_CREATED, ENTITY_UPDATED};
	use crate::event::{EntityChangeEvent, GenericEvent};
	use serde::Serialize;
	use serde_json::json;
	use std::sync::Arc;

	#[derive(Serialize)]
	struct Order {
		id: u64,
		name: String,
	}

	struct FixedTracker {
		changes: ChangeSet,
	}

	impl ChangeTracker for FixedTracker {
		fn change_set(&self, _entity: &EntitySnapshot) -> ChangeSet {
			self.changes.clone()
		}
	}

	fn resolver(probe: ChangeProbe) -> EntityChangeResolver {
		EntityChangeResolver::new(&AuditConfig::default(), probe)
	}

	fn order_event() -> EntityChangeEvent {
		EntityChangeEvent::capture(&Order {
			id: 7,
			name: "X".to_string(),
		})
		.unwrap()
	}

	fn changed_name() -> ChangeSet {
		let mut changes = ChangeSet::new();
		changes.insert(
			"name".to_string(),
			FieldChange {
				old: json!("W"),
				new: json!("X"),
			},
		);
		changes
	}

	#[test]
	fn created_event_composes_description_and_type() {
		let info = resolver(ChangeProbe::disabled())
			.resolve(&order_event(), ENTITY_CREATED)
			.unwrap();

		let ResolvedInfo::Fields(fields) = info else {
			panic!("expected fields");
		};
		assert_eq!(
			fields.get("description"),
			Some(&json!("Order has been created with name = \"X\""))
		);
		assert_eq!(fields.get("type"), Some(&json!("Order created")));
	}

	#[test]
	fn update_with_changes_resolves() {
		let probe = ChangeProbe::new(Arc::new(FixedTracker {
			changes: changed_name(),
		}));

		let info = resolver(probe).resolve(&order_event(), ENTITY_UPDATED).unwrap();

		let ResolvedInfo::Fields(fields) = info else {
			panic!("expected fields");
		};
		assert_eq!(
			fields.get("description"),
			Some(&json!("Order has been updated with name = \"X\""))
		);
		assert_eq!(fields.get("type"), Some(&json!("Order updated")));
	}

	#[test]
	fn noop_update_is_suppressed() {
		let probe = ChangeProbe::new(Arc::new(FixedTracker {
			changes: ChangeSet::new(),
		}));

		let info = resolver(probe).resolve(&order_event(), ENTITY_UPDATED).unwrap();

		assert!(matches!(info, ResolvedInfo::Skip));
	}

	#[test]
	fn entity_without_identifying_field_gets_the_short_description() {
		#[derive(Serialize)]
		struct Metric {
			value: f64,
		}

		let event = EntityChangeEvent::capture(&Metric { value: 0.5 }).unwrap();
		let info = resolver(ChangeProbe::disabled())
			.resolve(&event, ENTITY_CREATED)
			.unwrap();

		let ResolvedInfo::Fields(fields) = info else {
			panic!("expected fields");
		};
		assert_eq!(fields.get("description"), Some(&json!("Metric has been created")));
	}

	#[test]
	fn non_entity_event_is_skipped() {
		let info = resolver(ChangeProbe::disabled())
			.resolve(&GenericEvent::new(), ENTITY_CREATED)
			.unwrap();

		assert!(matches!(info, ResolvedInfo::Skip));
	}

	#[test]
	fn unknown_event_name_is_skipped() {
		let info = resolver(ChangeProbe::disabled())
			.resolve(&order_event(), "app.custom")
			.unwrap();

		assert!(matches!(info, ResolvedInfo::Skip));
	}
}
