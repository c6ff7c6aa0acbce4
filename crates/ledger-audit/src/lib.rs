// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod changeset;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod introspect;
pub mod pipeline;
pub mod record;
pub mod resolver;
pub mod sink;

pub use changeset::{ChangeProbe, ChangeSet, ChangeStatus, ChangeTracker, FieldChange};
pub use config::{AuditConfig, AuditConfigLayer, ENTITY_CREATED, ENTITY_REMOVED, ENTITY_UPDATED};
pub use context::{ActorProvider, RequestContext};
pub use dispatch::ResolverFactory;
pub use error::{AuditError, AuditResult, AuditSinkError};
pub use event::{AuditEvent, EntityChangeEvent, GenericEvent};
pub use introspect::EntitySnapshot;
pub use pipeline::AuditLogger;
pub use record::{AuditRecord, FieldMap, Severity};
pub use resolver::{
	CommonResolver, EntityChangeResolver, EventResolver, ResolvedInfo, ResolverRegistry,
};
pub use sink::{AuditSink, MemorySink, TracingSink};
