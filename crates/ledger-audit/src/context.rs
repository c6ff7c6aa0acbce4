// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request and actor collaborators.
//!
//! Both collaborators are best-effort by contract: events can originate from
//! command-line or background execution where no request exists, so every
//! accessor is allowed to come back empty and the pipeline carries on.

use serde_json::Value;
use tracing::warn;

/// Read-only view of the current request's network context.
///
/// Every accessor defaults to absent; hosts override what they can supply.
pub trait RequestContext: Send + Sync {
	fn client_ip(&self) -> Option<String> {
		None
	}

	fn port(&self) -> Option<u16> {
		None
	}

	fn host(&self) -> Option<String> {
		None
	}

	fn user_agent(&self) -> Option<String> {
		None
	}
}

/// Read-only access to the current authenticated actor, if any.
///
/// The actor is an opaque JSON value; configured properties are projected
/// off it when building the record.
pub trait ActorProvider: Send + Sync {
	fn current_actor(&self) -> Option<Value>;
}

/// Project a named property off an actor value.
///
/// A missing property is an expected condition (misconfigured property name,
/// heterogeneous actor types) and is recovered locally: it warns and yields
/// `None`, never aborting the pipeline.
pub(crate) fn project_property(actor: &Value, property: &str) -> Option<Value> {
	match actor.get(property) {
		Some(value) => Some(value.clone()),
		None => {
			warn!(property, "actor property not found, projection skipped");
			None
		}
	}
}

/// Render a projected value as text: string content as-is, anything else as
/// compact JSON.
pub(crate) fn text_value(value: Value) -> String {
	match value {
		Value::String(s) => s,
		other => other.to_string(),
	}
}
