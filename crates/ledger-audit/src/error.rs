// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

pub type AuditResult<T> = Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
	#[error("resolver returned unrecognized event info: {0}")]
	UnrecognizedEventInfo(String),

	#[error("entity is not introspectable: {0}")]
	UnrecognizedEntity(String),

	#[error("resolver service '{service}' configured for event '{event}' is not registered")]
	InvalidService { event: String, service: String },

	#[error("'{0}' is not a recognized severity level")]
	InvalidLevel(String),

	#[error("sink '{sink}' error: {source}")]
	Sink {
		sink: String,
		#[source]
		source: AuditSinkError,
	},
}

#[derive(Error, Debug)]
pub enum AuditSinkError {
	#[error("transient error: {0}")]
	Transient(String),

	#[error("permanent error: {0}")]
	Permanent(String),
}
