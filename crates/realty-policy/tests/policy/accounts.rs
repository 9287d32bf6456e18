// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Legacy records, user profiles, system config and audit logs.

use realty_policy::{AccessRequest, Collection, Operation, PolicyError, Principal, Profile, Record, Role};

use super::support::{run_policy_cases, Fixtures, PolicyCase};

#[test]
fn legacy_estimate_is_owner_only() {
	let f = Fixtures::new();
	let owner = Principal::new("U7", Profile::new(Role::Seller));
	let estimate = Record::new().with("userId", "U7").with("roof", 14000);

	run_policy_cases(&[
		PolicyCase {
			name: "owner reads",
			principal: Some(&owner),
			request: AccessRequest::read(Collection::RepairEstimates, estimate.clone()),
			expected: Ok(()),
		},
		PolicyCase {
			name: "owner updates",
			principal: Some(&owner),
			request: AccessRequest::update(
				Collection::RepairEstimates,
				estimate.clone(),
				estimate.clone().with("roof", 12000),
			),
			expected: Ok(()),
		},
		PolicyCase {
			name: "owner deletes",
			principal: Some(&owner),
			request: AccessRequest::delete(Collection::RepairEstimates, estimate.clone()),
			expected: Ok(()),
		},
		PolicyCase {
			name: "agent with no ownership is denied",
			principal: Some(&f.agent_a1),
			request: AccessRequest::read(Collection::RepairEstimates, estimate.clone()),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "agent cannot write",
			principal: Some(&f.agent_a1),
			request: AccessRequest::update(
				Collection::RepairEstimates,
				estimate.clone(),
				estimate.clone(),
			),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "create has no stored owner",
			principal: Some(&owner),
			request: AccessRequest::create(Collection::RepairEstimates, estimate),
			expected: Err(PolicyError::NotFound),
		},
	]);
}

#[test]
fn user_profiles() {
	let f = Fixtures::new();
	let profile = |op: Operation, key: &str| {
		AccessRequest::new(Collection::Users, op).with_resource_id(key)
	};
	run_policy_cases(&[
		PolicyCase {
			name: "read another profile",
			principal: Some(&f.buyer_c1),
			request: profile(Operation::Read, "A1"),
			expected: Ok(()),
		},
		PolicyCase {
			name: "create own profile",
			principal: Some(&f.stranger),
			request: profile(Operation::Create, "X1"),
			expected: Ok(()),
		},
		PolicyCase {
			name: "update someone else's profile",
			principal: Some(&f.agent_a1),
			request: profile(Operation::Update, "C1"),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "delete own profile",
			principal: Some(&f.agent_a1),
			request: profile(Operation::Delete, "A1"),
			expected: Err(PolicyError::Forbidden),
		},
	]);
}

#[test]
fn system_config_and_audit_logs() {
	let f = Fixtures::new();
	let entry = Record::new().with("userId", "C1").with("event", "offer_viewed");
	run_policy_cases(&[
		PolicyCase {
			name: "read config",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::new(Collection::SystemConfig, Operation::Read),
			expected: Ok(()),
		},
		PolicyCase {
			name: "agents cannot write config",
			principal: Some(&f.agent_a1),
			request: AccessRequest::create(Collection::SystemConfig, Record::new()),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "user appends own audit entry",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::create(Collection::AuditLogs, entry.clone()),
			expected: Ok(()),
		},
		PolicyCase {
			name: "agent cannot read client's audit entry",
			principal: Some(&f.agent_a1),
			request: AccessRequest::read(Collection::AuditLogs, entry.clone()),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "audit entries are immutable",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::update(Collection::AuditLogs, entry.clone(), entry),
			expected: Err(PolicyError::Forbidden),
		},
	]);
}
