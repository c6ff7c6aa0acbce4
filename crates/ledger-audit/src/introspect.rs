// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entity introspection for human-readable identification.
//!
//! Arbitrary domain entities are captured as an [`EntitySnapshot`] through
//! their `serde` representation: field names and values in declaration order,
//! plus the short type name. The snapshot is what resolver strategies scan to
//! find the best identifying field for a description sentence.

use serde::Serialize;
use serde_json::Value;

use crate::error::{AuditError, AuditResult};

/// A point-in-time view of an entity's fields, taken when the event carrying
/// the entity is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
	type_name: String,
	fields: Vec<(String, Value)>,
}

impl EntitySnapshot {
	/// Capture a snapshot of any serializable entity.
	///
	/// Entities whose serialized form is not a JSON object carry no
	/// introspectable fields and are rejected with
	/// [`AuditError::UnrecognizedEntity`].
	pub fn capture<T: Serialize>(entity: &T) -> AuditResult<Self> {
		let type_name = short_type_name(std::any::type_name::<T>());

		let value = serde_json::to_value(entity)
			.map_err(|e| AuditError::UnrecognizedEntity(format!("{type_name}: {e}")))?;

		match value {
			Value::Object(map) => Ok(Self {
				type_name: type_name.to_string(),
				fields: map.into_iter().collect(),
			}),
			other => Err(AuditError::UnrecognizedEntity(format!(
				"{type_name} serializes to {other}, not an object"
			))),
		}
	}

	/// Build a snapshot from an explicit type name and field list, for hosts
	/// that track entities outside of `serde`.
	pub fn from_parts(type_name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
		Self {
			type_name: type_name.into(),
			fields,
		}
	}

	/// Short type name of the captured entity, e.g. `"Order"`.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	pub fn fields(&self) -> &[(String, Value)] {
		&self.fields
	}

	/// Find the single best field for identifying this entity to a human.
	///
	/// One pass over all fields in declaration order. An exact lowercase
	/// match against a candidate name (e.g. `name`, `title`) wins immediately
	/// wherever it appears. Otherwise the first field named `id` or
	/// `<lowercase type name>id` seen during the scan is kept as a fallback;
	/// a candidate discovered after the fallback still wins. Candidate names
	/// communicate richer operator-facing sentences than opaque identifiers.
	pub fn identifying_field(&self, candidates: &[String]) -> Option<&str> {
		let id_pattern = format!("{}id", self.type_name.to_lowercase());
		let mut fallback = None;

		for (name, _) in &self.fields {
			let lower = name.to_lowercase();

			if candidates.iter().any(|candidate| lower == *candidate) {
				return Some(name);
			}

			if fallback.is_none() && (lower == "id" || lower == id_pattern) {
				fallback = Some(name.as_str());
			}
		}

		fallback
	}

	/// Render a field's value for inclusion in a description.
	///
	/// Descriptions must never block logging: a field that cannot be read
	/// yields a sentinel string instead of an error.
	pub fn field_display(&self, name: &str) -> String {
		match self.fields.iter().find(|(field, _)| field == name) {
			Some((_, Value::String(s))) => s.clone(),
			Some((_, value)) => value.to_string(),
			None => format!("{{INACCESSIBLE}} property! no field named \"{name}\""),
		}
	}
}

fn short_type_name(full: &str) -> &str {
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	fn candidates() -> Vec<String> {
		vec!["name".to_string(), "title".to_string()]
	}

	#[derive(Serialize)]
	struct Order {
		id: u64,
		name: String,
		total: f64,
	}

	mod capture {
		use super::*;

		#[test]
		fn captures_fields_in_declaration_order() {
			let order = Order {
				id: 7,
				name: "X".to_string(),
				total: 12.5,
			};

			let snapshot = EntitySnapshot::capture(&order).unwrap();

			assert_eq!(snapshot.type_name(), "Order");
			let names: Vec<&str> = snapshot.fields().iter().map(|(n, _)| n.as_str()).collect();
			assert_eq!(names, ["id", "name", "total"]);
		}

		#[test]
		fn non_object_entity_is_rejected() {
			let err = EntitySnapshot::capture(&42u32).unwrap_err();
			assert!(matches!(err, AuditError::UnrecognizedEntity(_)));
		}
	}

	mod identifying_field {
		use super::*;

		#[test]
		fn candidate_beats_id_fallback() {
			#[derive(Serialize)]
			struct Article {
				id: u64,
				title: String,
			}

			let snapshot = EntitySnapshot::capture(&Article {
				id: 1,
				title: "hello".to_string(),
			})
			.unwrap();

			assert_eq!(snapshot.identifying_field(&candidates()), Some("title"));
		}

		#[test]
		fn candidate_wins_even_when_found_after_the_fallback() {
			let snapshot = EntitySnapshot::from_parts(
				"Order",
				vec![
					("id".to_string(), json!(1)),
					("total".to_string(), json!(9)),
					("name".to_string(), json!("X")),
				],
			);

			assert_eq!(snapshot.identifying_field(&candidates()), Some("name"));
		}

		#[test]
		fn type_specific_id_is_used_without_candidates() {
			let snapshot = EntitySnapshot::from_parts(
				"Order",
				vec![
					("total".to_string(), json!(9)),
					("orderId".to_string(), json!(42)),
				],
			);

			assert_eq!(snapshot.identifying_field(&candidates()), Some("orderId"));
		}

		#[test]
		fn first_id_like_field_wins_among_fallbacks() {
			let snapshot = EntitySnapshot::from_parts(
				"Order",
				vec![
					("orderId".to_string(), json!(42)),
					("id".to_string(), json!(1)),
				],
			);

			assert_eq!(snapshot.identifying_field(&candidates()), Some("orderId"));
		}

		#[test]
		fn no_candidate_and_no_id_yields_none() {
			let snapshot = EntitySnapshot::from_parts(
				"Order",
				vec![
					("total".to_string(), json!(9)),
					("note".to_string(), json!("n/a")),
				],
			);

			assert_eq!(snapshot.identifying_field(&candidates()), None);
		}

		proptest! {
			// A candidate-named field wins over `id` regardless of where the
			// two sit in the scan order.
			#[test]
			fn candidate_beats_fallback_at_any_position(
				front in prop::collection::vec("[a-hj-mo-su-z][a-z]{2,8}", 0..4),
				back in prop::collection::vec("[a-hj-mo-su-z][a-z]{2,8}", 0..4),
				id_first in any::<bool>(),
			) {
				let mut fields: Vec<(String, Value)> = Vec::new();
				for f in &front {
					fields.push((f.clone(), json!(0)));
				}
				if id_first {
					fields.push(("id".to_string(), json!(1)));
					fields.push(("title".to_string(), json!("t")));
				} else {
					fields.push(("title".to_string(), json!("t")));
					fields.push(("id".to_string(), json!(1)));
				}
				for f in &back {
					fields.push((f.clone(), json!(0)));
				}

				let snapshot = EntitySnapshot::from_parts("Order", fields);
				prop_assert_eq!(snapshot.identifying_field(&candidates()), Some("title"));
			}
		}
	}

	mod field_display {
		use super::*;

		#[test]
		fn string_values_render_unquoted() {
			let snapshot =
				EntitySnapshot::from_parts("Order", vec![("name".to_string(), json!("X"))]);
			assert_eq!(snapshot.field_display("name"), "X");
		}

		#[test]
		fn non_string_values_render_as_json() {
			let snapshot =
				EntitySnapshot::from_parts("Order", vec![("orderId".to_string(), json!(42))]);
			assert_eq!(snapshot.field_display("orderId"), "42");
		}

		#[test]
		fn missing_field_yields_sentinel() {
			let snapshot = EntitySnapshot::from_parts("Order", vec![]);
			let rendered = snapshot.field_display("name");
			assert!(rendered.starts_with("{INACCESSIBLE} property!"), "{rendered}");
		}
	}
}
