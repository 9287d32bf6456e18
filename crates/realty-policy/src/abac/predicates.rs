// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role and relationship predicates.
//!
//! The boolean functions here mirror the named predicates of the database rule
//! set and accept an optional principal so they can be evaluated for anonymous
//! callers. The `require_*` helpers wrap them as [`Check`]s for use inside
//! policy modules, where `?` chains conjuncts and the first failure becomes the
//! deny reason.

use crate::abac::types::{Check, DenyReason, PolicyOptions};
use crate::permissions::{DocumentPermission, PermissionSet};
use crate::record::{Record, AGENT_ID, CLIENT_ID};
use crate::types::{Principal, Role};

/// True iff a principal was resolved.
pub fn is_authenticated(principal: Option<&Principal>) -> bool {
	principal.is_some()
}

pub fn has_role(principal: Option<&Principal>, role: Role) -> bool {
	principal.is_some_and(|p| p.role() == role)
}

pub fn is_agent(principal: Option<&Principal>) -> bool {
	has_role(principal, Role::Agent)
}

pub fn is_buyer(principal: Option<&Principal>) -> bool {
	has_role(principal, Role::Buyer)
}

pub fn is_seller(principal: Option<&Principal>) -> bool {
	has_role(principal, Role::Seller)
}

/// Buyer or seller.
pub fn is_client(principal: Option<&Principal>) -> bool {
	is_buyer(principal) || is_seller(principal)
}

/// Exact, case-sensitive id equality. A missing or non-string field never matches.
pub fn is_owner(principal: Option<&Principal>, field_value: Option<&str>) -> bool {
	match (principal, field_value) {
		(Some(p), Some(value)) => p.id.as_str() == value,
		_ => false,
	}
}

/// An agent reaches a client by listing it in its profile.
pub fn has_agent_client_access(principal: Option<&Principal>, client_id: Option<&str>) -> bool {
	if !is_agent(principal) {
		return false;
	}
	match (principal, client_id) {
		(Some(p), Some(client)) => p.profile.lists_client(client),
		_ => false,
	}
}

/// The principal may act as the record's client. Agents only may when
/// [`PolicyOptions::agent_self_client`] is set.
pub fn is_acting_client(
	principal: Option<&Principal>,
	client_id: Option<&str>,
	options: &PolicyOptions,
) -> bool {
	is_owner(principal, client_id) && (options.agent_self_client || !is_agent(principal))
}

/// The agent, the client, or an agent associated with the client.
pub fn has_resource_access(
	principal: Option<&Principal>,
	agent_id: Option<&str>,
	client_id: Option<&str>,
	options: &PolicyOptions,
) -> bool {
	is_owner(principal, agent_id)
		|| is_acting_client(principal, client_id, options)
		|| has_agent_client_access(principal, client_id)
}

pub(crate) fn require_agent(principal: &Principal) -> Check {
	if is_agent(Some(principal)) {
		Ok(())
	} else {
		Err(DenyReason::NotAgent)
	}
}

pub(crate) fn require_owner(principal: &Principal, record: &Record, field: &'static str) -> Check {
	if is_owner(Some(principal), record.str_field(field)) {
		Ok(())
	} else {
		Err(DenyReason::NotOwner { field })
	}
}

pub(crate) fn require_resource_access(
	principal: &Principal,
	record: &Record,
	options: &PolicyOptions,
) -> Check {
	if has_resource_access(
		Some(principal),
		record.agent_id(),
		record.client_id(),
		options,
	) {
		Ok(())
	} else {
		Err(DenyReason::NoResourceAccess)
	}
}

/// The principal is named as the record's agent or client.
pub(crate) fn require_party(principal: &Principal, record: &Record) -> Check {
	let p = Some(principal);
	if is_owner(p, record.str_field(AGENT_ID)) || is_owner(p, record.str_field(CLIENT_ID)) {
		Ok(())
	} else {
		Err(DenyReason::NotParty)
	}
}

pub(crate) fn require_listed(
	principal: &Principal,
	record: &Record,
	permission: DocumentPermission,
) -> Check {
	if PermissionSet::from_record(record).is_listed(principal.id.as_str(), permission) {
		Ok(())
	} else {
		Err(DenyReason::NotInAcl { permission })
	}
}
