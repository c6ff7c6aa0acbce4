// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit pipeline configuration.
//!
//! Hosts deserialize an [`AuditConfigLayer`] per source (file, environment,
//! defaults), merge the layers and finalize into an [`AuditConfig`]. The
//! config is loaded once at startup and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::record::FieldMap;

/// Event identifier for entity creation.
pub const ENTITY_CREATED: &str = "entity.created";
/// Event identifier for entity updates.
pub const ENTITY_UPDATED: &str = "entity.updated";
/// Event identifier for entity removal.
pub const ENTITY_REMOVED: &str = "entity.removed";

const DEFAULT_ANONYMOUS_LABEL: &str = "anonymous";

fn default_anonymous_label() -> String {
	DEFAULT_ANONYMOUS_LABEL.to_string()
}

fn default_candidate_fields() -> Vec<String> {
	vec!["name".to_string(), "title".to_string()]
}

fn default_lifecycle_verbs() -> HashMap<String, String> {
	HashMap::from([
		(ENTITY_CREATED.to_string(), "created".to_string()),
		(ENTITY_UPDATED.to_string(), "updated".to_string()),
		(ENTITY_REMOVED.to_string(), "removed".to_string()),
	])
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditConfig {
	/// Actor label recorded when no authenticated actor is available.
	pub anonymous_label: String,
	/// Actor property projected into the record's `user` field; the raw
	/// actor value is used when unset.
	pub user_property: Option<String>,
	/// Actor property projected into the record's `email` field.
	pub email_property: Option<String>,
	/// Event name to resolver service id.
	pub custom_resolvers: HashMap<String, String>,
	/// Field values stamped on every record, after everything else.
	pub static_fields: FieldMap,
	/// Recognized entity-lifecycle event identifiers and their short verbs.
	pub lifecycle_verbs: HashMap<String, String>,
	/// Field names preferred for human-readable identification.
	pub candidate_fields: Vec<String>,
	/// Strict mode surfaces configuration mistakes as hard errors;
	/// production mode degrades to skipping the record instead.
	pub strict: bool,
}

impl Default for AuditConfig {
	fn default() -> Self {
		Self {
			anonymous_label: default_anonymous_label(),
			user_property: None,
			email_property: None,
			custom_resolvers: HashMap::new(),
			static_fields: FieldMap::new(),
			lifecycle_verbs: default_lifecycle_verbs(),
			candidate_fields: default_candidate_fields(),
			strict: false,
		}
	}
}

impl AuditConfig {
	/// Whether `event_name` is one of the recognized entity-lifecycle events.
	pub fn is_lifecycle_event(&self, event_name: &str) -> bool {
		self.lifecycle_verbs.contains_key(event_name)
	}

	/// The short verb for a lifecycle event identifier.
	pub fn short_verb(&self, event_name: &str) -> Option<&str> {
		self.lifecycle_verbs.get(event_name).map(String::as_str)
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditConfigLayer {
	pub anonymous_label: Option<String>,
	pub user_property: Option<String>,
	pub email_property: Option<String>,
	pub custom_resolvers: Option<HashMap<String, String>>,
	pub static_fields: Option<FieldMap>,
	pub lifecycle_verbs: Option<HashMap<String, String>>,
	pub candidate_fields: Option<Vec<String>>,
	pub strict: Option<bool>,
}

impl AuditConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.anonymous_label.is_some() {
			self.anonymous_label = other.anonymous_label;
		}
		if other.user_property.is_some() {
			self.user_property = other.user_property;
		}
		if other.email_property.is_some() {
			self.email_property = other.email_property;
		}
		if other.custom_resolvers.is_some() {
			self.custom_resolvers = other.custom_resolvers;
		}
		if other.static_fields.is_some() {
			self.static_fields = other.static_fields;
		}
		if other.lifecycle_verbs.is_some() {
			self.lifecycle_verbs = other.lifecycle_verbs;
		}
		if other.candidate_fields.is_some() {
			self.candidate_fields = other.candidate_fields;
		}
		if other.strict.is_some() {
			self.strict = other.strict;
		}
	}

	pub fn finalize(self) -> AuditConfig {
		AuditConfig {
			anonymous_label: self.anonymous_label.unwrap_or_else(default_anonymous_label),
			user_property: self.user_property,
			email_property: self.email_property,
			custom_resolvers: self.custom_resolvers.unwrap_or_default(),
			static_fields: self.static_fields.unwrap_or_default(),
			lifecycle_verbs: self.lifecycle_verbs.unwrap_or_else(default_lifecycle_verbs),
			candidate_fields: self
				.candidate_fields
				.unwrap_or_else(default_candidate_fields),
			strict: self.strict.unwrap_or(false),
		}
	}
}
