// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Change awareness for update events.
//!
//! The pipeline is not a diffing library; it only needs to know whether an
//! update is materially meaningful. Dirty tracking itself belongs to the
//! host's unit of work, exposed here through the [`ChangeTracker`] trait.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::introspect::EntitySnapshot;

/// The short verb that marks an event as an update.
pub const UPDATE_VERB: &str = "updated";

/// Old and new value of a single changed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
	pub old: Value,
	pub new: Value,
}

/// Field-level differences reported by the host's dirty tracking.
pub type ChangeSet = BTreeMap<String, FieldChange>;

/// Read-only access to the host persistence layer's dirty tracking.
pub trait ChangeTracker: Send + Sync {
	/// The change set for `entity` in the current unit of work, empty when
	/// nothing changed.
	fn change_set(&self, entity: &EntitySnapshot) -> ChangeSet;
}

/// Outcome of asking whether an event's entity actually changed.
///
/// `NotApplicable` (non-update events, or no tracker wired up) is distinct
/// from `Unchanged`: only the latter tells the caller to suppress the event.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeStatus {
	NotApplicable,
	Unchanged,
	Changed(ChangeSet),
}

/// Wraps an optional [`ChangeTracker`] and answers "does this update change
/// anything" for resolver strategies.
#[derive(Clone, Default)]
pub struct ChangeProbe {
	tracker: Option<Arc<dyn ChangeTracker>>,
}

impl ChangeProbe {
	pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
		Self {
			tracker: Some(tracker),
		}
	}

	/// A probe with no tracker: every event resolves to `NotApplicable`.
	pub fn disabled() -> Self {
		Self { tracker: None }
	}

	pub fn status(&self, verb: &str, entity: &EntitySnapshot) -> ChangeStatus {
		if verb != UPDATE_VERB {
			return ChangeStatus::NotApplicable;
		}

		let Some(tracker) = &self.tracker else {
			return ChangeStatus::NotApplicable;
		};

		let changes = tracker.change_set(entity);

		if changes.is_empty() {
			ChangeStatus::Unchanged
		} else {
			ChangeStatus::Changed(changes)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	struct FixedTracker {
		changes: ChangeSet,
	}

	impl ChangeTracker for FixedTracker {
		fn change_set(&self, _entity: &EntitySnapshot) -> ChangeSet {
			self.changes.clone()
		}
	}

	fn snapshot() -> EntitySnapshot {
		EntitySnapshot::from_parts("Order", vec![("name".to_string(), json!("X"))])
	}

	#[test]
	fn non_update_verbs_are_not_applicable() {
		let tracker = Arc::new(FixedTracker {
			changes: ChangeSet::new(),
		});
		let probe = ChangeProbe::new(tracker);

		assert_eq!(probe.status("created", &snapshot()), ChangeStatus::NotApplicable);
		assert_eq!(probe.status("removed", &snapshot()), ChangeStatus::NotApplicable);
	}

	#[test]
	fn empty_change_set_reports_unchanged() {
		let probe = ChangeProbe::new(Arc::new(FixedTracker {
			changes: ChangeSet::new(),
		}));

		assert_eq!(probe.status(UPDATE_VERB, &snapshot()), ChangeStatus::Unchanged);
	}

	#[test]
	fn non_empty_change_set_reports_changed() {
		let mut changes = ChangeSet::new();
		changes.insert(
			"name".to_string(),
			FieldChange {
				old: json!("X"),
				new: json!("Y"),
			},
		);
		let probe = ChangeProbe::new(Arc::new(FixedTracker {
			changes: changes.clone(),
		}));

		assert_eq!(
			probe.status(UPDATE_VERB, &snapshot()),
			ChangeStatus::Changed(changes)
		);
	}

	#[test]
	fn missing_tracker_is_not_applicable_even_for_updates() {
		let probe = ChangeProbe::disabled();
		assert_eq!(probe.status(UPDATE_VERB, &snapshot()), ChangeStatus::NotApplicable);
	}
}
