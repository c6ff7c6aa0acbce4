// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The canonical audit record shape.
//!
//! This module provides the record every resolver strategy ultimately
//! produces:
//!
//! - [`Severity`]: RFC 5424-compatible severity levels (a closed set)
//! - [`AuditRecord`]: the assembled audit entry
//! - [`FieldMap`]: the raw field-map shape resolvers may return instead of a
//!   fully built record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{AuditError, AuditResult};

/// A raw field-name to value mapping, as returned by resolvers that do not
/// build a full [`AuditRecord`] themselves.
pub type FieldMap = serde_json::Map<String, Value>;

/// Severity levels for audit records, compatible with RFC 5424 syslog.
///
/// The numeric values correspond to syslog severity codes, allowing direct
/// mapping when forwarding to syslog-based SIEM systems. The set is closed:
/// parsing anything outside it is a hard error, never a silent coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
	Emergency = 0,
	Alert = 1,
	Critical = 2,
	Error = 3,
	Warning = 4,
	Notice = 5,
	#[default]
	Info = 6,
	Debug = 7,
}

impl Severity {
	/// Returns the RFC 5424 numeric severity code.
	pub fn as_syslog_code(&self) -> u8 {
		*self as u8
	}

	/// Returns all severity levels from most to least severe.
	pub fn all() -> &'static [Severity] {
		&[
			Severity::Emergency,
			Severity::Alert,
			Severity::Critical,
			Severity::Error,
			Severity::Warning,
			Severity::Notice,
			Severity::Info,
			Severity::Debug,
		]
	}
}

impl PartialOrd for Severity {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Severity {
	fn cmp(&self, other: &Self) -> Ordering {
		// Lower numeric value = higher severity (Emergency=0 > Debug=7)
		(*other as u8).cmp(&(*self as u8))
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Severity::Emergency => "emergency",
			Severity::Alert => "alert",
			Severity::Critical => "critical",
			Severity::Error => "error",
			Severity::Warning => "warning",
			Severity::Notice => "notice",
			Severity::Info => "info",
			Severity::Debug => "debug",
		};
		write!(f, "{s}")
	}
}

impl FromStr for Severity {
	type Err = AuditError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"emergency" => Ok(Severity::Emergency),
			"alert" => Ok(Severity::Alert),
			"critical" => Ok(Severity::Critical),
			"error" => Ok(Severity::Error),
			"warning" => Ok(Severity::Warning),
			"notice" => Ok(Severity::Notice),
			"info" => Ok(Severity::Info),
			"debug" => Ok(Severity::Debug),
			_ => Err(AuditError::InvalidLevel(s.to_string())),
		}
	}
}

/// An assembled audit record for a single captured event.
///
/// Resolver strategies fill in `type`/`description`; the dispatch layer
/// stamps `type_id`, network context, `event_time`, actor identity and
/// configured static fields afterwards. Arbitrary configured fields that do
/// not map to a declared column live in `extra` and are flattened on
/// serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
	/// Unique identifier for this record.
	pub id: Uuid,
	/// Stable identifier of the originating event kind (the event name).
	pub type_id: String,
	/// Human classification, e.g. `"Order updated"`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Human-readable sentence describing the event.
	pub description: String,
	/// Set once by the dispatch layer when the record is finalized.
	pub event_time: Option<DateTime<Utc>>,
	/// Actor identity: an opaque value or a projected actor property.
	pub user: Option<Value>,
	/// Actor email, when an email projection property is configured.
	pub email: Option<String>,
	pub ip: Option<String>,
	pub port: Option<u16>,
	pub host: Option<String>,
	pub user_agent: Option<String>,
	pub level: Severity,
	#[serde(flatten)]
	pub extra: FieldMap,
}

impl Default for AuditRecord {
	fn default() -> Self {
		Self {
			id: Uuid::new_v4(),
			type_id: String::new(),
			kind: String::new(),
			description: String::new(),
			event_time: None,
			user: None,
			email: None,
			ip: None,
			port: None,
			host: None,
			user_agent: None,
			level: Severity::Info,
			extra: FieldMap::new(),
		}
	}
}

impl AuditRecord {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a record from a raw resolver field map.
	///
	/// Recognized field names populate the declared columns; anything else is
	/// kept in `extra`, so the conversion is lossless.
	pub fn from_fields(fields: &FieldMap) -> AuditResult<Self> {
		let mut record = Self::new();

		for (name, value) in fields {
			record.set_field(name, value.clone())?;
		}

		Ok(record)
	}

	/// Assign a field by name.
	///
	/// `"level"` is validated against the closed [`Severity`] set and an
	/// invalid value is always a hard error. A type mismatch on any other
	/// recognized field yields [`AuditError::UnrecognizedEventInfo`]. Unknown
	/// names are stored in `extra`, overwriting any previous value.
	pub fn set_field(&mut self, name: &str, value: Value) -> AuditResult<()> {
		match name {
			"type_id" => self.type_id = expect_string(name, &value)?,
			"type" | "kind" => self.kind = expect_string(name, &value)?,
			"description" => self.description = expect_string(name, &value)?,
			"event_time" => {
				self.event_time = Some(serde_json::from_value(value).map_err(|e| {
					AuditError::UnrecognizedEventInfo(format!("field 'event_time': {e}"))
				})?);
			}
			"user" => self.user = Some(value),
			"email" => self.email = Some(expect_string(name, &value)?),
			"ip" => self.ip = Some(expect_string(name, &value)?),
			"port" => {
				let port = value
					.as_u64()
					.and_then(|p| u16::try_from(p).ok())
					.ok_or_else(|| {
						AuditError::UnrecognizedEventInfo(format!(
							"field 'port' expects a port number, got {value}"
						))
					})?;
				self.port = Some(port);
			}
			"host" => self.host = Some(expect_string(name, &value)?),
			"user_agent" => self.user_agent = Some(expect_string(name, &value)?),
			"level" => {
				let level = value
					.as_str()
					.ok_or_else(|| AuditError::InvalidLevel(value.to_string()))?;
				self.level = level.parse()?;
			}
			_ => {
				self.extra.insert(name.to_string(), value);
			}
		}

		Ok(())
	}
}

fn expect_string(field: &str, value: &Value) -> AuditResult<String> {
	value
		.as_str()
		.map(str::to_string)
		.ok_or_else(|| {
			AuditError::UnrecognizedEventInfo(format!(
				"field '{field}' expects a string, got {value}"
			))
		})
}
