// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Decision audit records.
//!
//! Every decision made through [`crate::Authorizer`] produces a
//! [`DecisionRecord`] carrying the full deny reason. Records are internal: they
//! go to a [`DecisionSink`], never back to the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::abac::{AccessRequest, Decision, DenyReason};
use crate::types::{Collection, Operation, PrincipalId, ResourceId};

/// Whether access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
	Granted,
	Denied,
}

impl std::fmt::Display for DecisionOutcome {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DecisionOutcome::Granted => write!(f, "granted"),
			DecisionOutcome::Denied => write!(f, "denied"),
		}
	}
}

/// One evaluated request.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRecord {
	pub id: Uuid,
	pub timestamp: DateTime<Utc>,
	/// `None` when the principal could not be resolved.
	pub principal_id: Option<PrincipalId>,
	pub collection: Collection,
	pub operation: Operation,
	pub resource_id: Option<ResourceId>,
	pub outcome: DecisionOutcome,
	pub reason: Option<DenyReason>,
}

impl DecisionRecord {
	pub fn new(
		principal_id: Option<&PrincipalId>,
		request: &AccessRequest,
		decision: &Decision,
	) -> Self {
		let (outcome, reason) = match decision {
			Decision::Allow => (DecisionOutcome::Granted, None),
			Decision::Deny(reason) => (DecisionOutcome::Denied, Some(reason.clone())),
		};
		Self {
			id: Uuid::new_v4(),
			timestamp: Utc::now(),
			principal_id: principal_id.cloned(),
			collection: request.collection,
			operation: request.operation,
			resource_id: request.resource_id.clone(),
			outcome,
			reason,
		}
	}
}

/// Destination for decision records.
pub trait DecisionSink: Send + Sync {
	fn record(&self, record: &DecisionRecord);
}

/// Writes records to the `realty_policy::audit` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DecisionSink for TracingSink {
	fn record(&self, record: &DecisionRecord) {
		let principal = record
			.principal_id
			.as_ref()
			.map(|p| p.as_str())
			.unwrap_or("<anonymous>");
		match &record.reason {
			None => debug!(
				target: "realty_policy::audit",
				audit_id = %record.id,
				principal_id = principal,
				collection = %record.collection,
				operation = %record.operation,
				outcome = %record.outcome,
				"policy decision"
			),
			Some(reason) => info!(
				target: "realty_policy::audit",
				audit_id = %record.id,
				principal_id = principal,
				collection = %record.collection,
				operation = %record.operation,
				outcome = %record.outcome,
				%reason,
				"policy decision"
			),
		}
	}
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
	records: Mutex<Vec<DecisionRecord>>,
}

impl RecordingSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of the records captured so far.
	pub fn records(&self) -> Vec<DecisionRecord> {
		match self.records.lock() {
			Ok(records) => records.clone(),
			Err(poisoned) => poisoned.into_inner().clone(),
		}
	}
}

impl DecisionSink for RecordingSink {
	fn record(&self, record: &DecisionRecord) {
		match self.records.lock() {
			Ok(mut records) => records.push(record.clone()),
			Err(poisoned) => poisoned.into_inner().push(record.clone()),
		}
	}
}
