// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User profiles, system configuration, audit logs and legacy single-owner records.

use crate::abac::predicates::{is_owner, require_owner};
use crate::abac::{AccessRequest, Check, DenyReason};
use crate::record::USER_ID;
use crate::types::{Operation, Principal};

/// Legacy records are owned by `userId` for every operation.
///
/// The owner is always read from the stored record, so a create (which has
/// none) is denied.
pub fn evaluate_legacy(principal: &Principal, request: &AccessRequest) -> Check {
	require_owner(principal, request.existing()?, USER_ID)
}

/// Profiles are keyed by the principal id.
pub fn evaluate_user(principal: &Principal, request: &AccessRequest) -> Check {
	match request.operation {
		Operation::Read => Ok(()),
		Operation::Create | Operation::Update => {
			let key = request.resource_id.as_ref().map(|id| id.as_str());
			if is_owner(Some(principal), key) {
				Ok(())
			} else {
				Err(DenyReason::NotOwner { field: "id" })
			}
		}
		Operation::Delete => Err(DenyReason::OperationNotPermitted),
	}
}

/// Configuration is read-only to every principal.
pub fn evaluate_system_config(_principal: &Principal, request: &AccessRequest) -> Check {
	match request.operation {
		Operation::Read => Ok(()),
		_ => Err(DenyReason::OperationNotPermitted),
	}
}

/// Audit entries are append-only and visible to the user they concern.
pub fn evaluate_audit_log(principal: &Principal, request: &AccessRequest) -> Check {
	match request.operation {
		Operation::Read => require_owner(principal, request.existing()?, USER_ID),
		Operation::Create => require_owner(principal, request.proposed()?, USER_ID),
		Operation::Update | Operation::Delete => Err(DenyReason::OperationNotPermitted),
	}
}
