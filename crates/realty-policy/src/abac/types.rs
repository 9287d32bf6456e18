// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for policy evaluation.
//!
//! - [`AccessRequest`]: The collection, operation and resource snapshots being checked
//! - [`Decision`]: The allow/deny outcome
//! - [`DenyReason`]: Which conjunct failed, for logs and audit only
//! - [`PolicyOptions`]: Switches that alter rule semantics
//!
//! The existing snapshot (what is stored now) and the proposed snapshot (what a
//! write would store) are passed explicitly. Updates consult both: ownership is
//! checked against the existing record and schema validation against the
//! proposed one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PolicyError, ValidationError};
use crate::permissions::DocumentPermission;
use crate::record::Record;
use crate::types::{Collection, Operation, ResourceId};

/// A request to perform `operation` on a record of `collection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
	pub collection: Collection,
	pub operation: Operation,
	/// Document key, when the rule needs it (user profiles are keyed by principal id).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub resource_id: Option<ResourceId>,
	/// Stored record, for read/update/delete.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub existing: Option<Record>,
	/// Pending record, for create/update.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub proposed: Option<Record>,
}

impl AccessRequest {
	pub fn new(collection: Collection, operation: Operation) -> Self {
		Self {
			collection,
			operation,
			resource_id: None,
			existing: None,
			proposed: None,
		}
	}

	pub fn read(collection: Collection, existing: Record) -> Self {
		Self::new(collection, Operation::Read).with_existing(existing)
	}

	pub fn create(collection: Collection, proposed: Record) -> Self {
		Self::new(collection, Operation::Create).with_proposed(proposed)
	}

	pub fn update(collection: Collection, existing: Record, proposed: Record) -> Self {
		Self::new(collection, Operation::Update)
			.with_existing(existing)
			.with_proposed(proposed)
	}

	pub fn delete(collection: Collection, existing: Record) -> Self {
		Self::new(collection, Operation::Delete).with_existing(existing)
	}

	/// Builder: set the document key.
	pub fn with_resource_id(mut self, id: impl Into<ResourceId>) -> Self {
		self.resource_id = Some(id.into());
		self
	}

	/// Builder: set the existing snapshot.
	pub fn with_existing(mut self, existing: Record) -> Self {
		self.existing = Some(existing);
		self
	}

	/// Builder: set the proposed snapshot.
	pub fn with_proposed(mut self, proposed: Record) -> Self {
		self.proposed = Some(proposed);
		self
	}

	/// The existing snapshot, or [`DenyReason::ResourceMissing`].
	pub fn existing(&self) -> Result<&Record, DenyReason> {
		self.existing.as_ref().ok_or(DenyReason::ResourceMissing)
	}

	/// The proposed snapshot, or [`DenyReason::ProposalMissing`].
	pub fn proposed(&self) -> Result<&Record, DenyReason> {
		self.proposed.as_ref().ok_or(DenyReason::ProposalMissing)
	}
}

/// Why a request was denied.
///
/// Only for logs and audit records. Never surface this to an end user; map it
/// through [`DenyReason::error`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenyReason {
	/// No resolvable principal.
	Unauthenticated,
	/// The rule requires the agent role.
	NotAgent,
	/// The principal's id does not equal the named owner field.
	NotOwner { field: &'static str },
	/// The principal is neither the agent, the client, nor the client's agent.
	NoResourceAccess,
	/// The principal is neither the agent nor the client named by the record.
	NotParty,
	/// The principal is missing from a document ACL list.
	NotInAcl { permission: DocumentPermission },
	/// The proposed record failed its schema.
	Validation { error: ValidationError },
	/// The rule needs a stored record and none was supplied.
	ResourceMissing,
	/// The rule needs proposed data and none was supplied.
	ProposalMissing,
	/// The collection never permits this operation.
	OperationNotPermitted,
}

impl DenyReason {
	/// Maps the reason onto the caller-facing error taxonomy.
	pub fn error(&self) -> PolicyError {
		match self {
			DenyReason::Unauthenticated => PolicyError::Unauthenticated,
			DenyReason::Validation { .. } | DenyReason::ProposalMissing => {
				PolicyError::ValidationFailed
			}
			DenyReason::ResourceMissing => PolicyError::NotFound,
			DenyReason::NotAgent
			| DenyReason::NotOwner { .. }
			| DenyReason::NoResourceAccess
			| DenyReason::NotParty
			| DenyReason::NotInAcl { .. }
			| DenyReason::OperationNotPermitted => PolicyError::Forbidden,
		}
	}
}

impl fmt::Display for DenyReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DenyReason::Unauthenticated => write!(f, "unauthenticated"),
			DenyReason::NotAgent => write!(f, "principal is not an agent"),
			DenyReason::NotOwner { field } => write!(f, "principal does not own `{field}`"),
			DenyReason::NoResourceAccess => write!(f, "no agent/client relationship to resource"),
			DenyReason::NotParty => write!(f, "principal is not a party to the record"),
			DenyReason::NotInAcl { permission } => write!(f, "principal not listed in {permission}"),
			DenyReason::Validation { error } => write!(f, "{error}"),
			DenyReason::ResourceMissing => write!(f, "existing resource snapshot missing"),
			DenyReason::ProposalMissing => write!(f, "proposed resource data missing"),
			DenyReason::OperationNotPermitted => write!(f, "operation not permitted on collection"),
		}
	}
}

impl From<ValidationError> for DenyReason {
	fn from(error: ValidationError) -> Self {
		DenyReason::Validation { error }
	}
}

/// Result of a single conjunct or of a whole rule.
pub type Check = Result<(), DenyReason>;

/// Outcome of evaluating an [`AccessRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
	Allow,
	Deny(DenyReason),
}

impl Decision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allow)
	}

	pub fn reason(&self) -> Option<&DenyReason> {
		match self {
			Decision::Allow => None,
			Decision::Deny(reason) => Some(reason),
		}
	}

	/// Converts to the caller-facing result.
	pub fn into_result(self) -> Result<(), PolicyError> {
		match self {
			Decision::Allow => Ok(()),
			Decision::Deny(reason) => Err(reason.error()),
		}
	}
}

impl From<Check> for Decision {
	fn from(check: Check) -> Self {
		match check {
			Ok(()) => Decision::Allow,
			Err(reason) => Decision::Deny(reason),
		}
	}
}

/// Switches that alter rule semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyOptions {
	/// Lets an agent reach a resource through the `clientId` disjunct of
	/// resource access, i.e. act as a client on its own records.
	///
	/// Enabled by default so that evaluation matches the database rule set. When
	/// off, an agent named as `clientId` needs to be the record's `agentId` or
	/// list that client. Buyers and sellers are unaffected, as is the party
	/// check applied when creating documents.
	pub agent_self_client: bool,
}

impl Default for PolicyOptions {
	fn default() -> Self {
		Self {
			agent_self_client: true,
		}
	}
}
