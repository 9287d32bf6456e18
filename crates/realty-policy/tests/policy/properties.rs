// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property tests over the public API.

use proptest::prelude::*;
use realty_policy::abac::predicates::has_resource_access;
use realty_policy::{
	evaluate, AccessRequest, Collection, Decision, DenyReason, Operation, PolicyOptions, Principal,
	Profile, Record, Role,
};

fn arb_id() -> impl Strategy<Value = String> {
	proptest::sample::select(vec!["A1", "A2", "C1", "C2", "U1"]).prop_map(|s| s.to_string())
}

fn arb_principal() -> impl Strategy<Value = Principal> {
	(
		arb_id(),
		proptest::sample::select(Role::all().to_vec()),
		proptest::collection::btree_set(arb_id(), 0..3),
	)
		.prop_map(|(id, role, clients)| {
			let mut profile = Profile::new(role);
			for client in clients {
				profile.client_ids.insert(client, true);
			}
			Principal::new(id, profile)
		})
}

fn arb_record() -> impl Strategy<Value = Record> {
	(arb_id(), arb_id(), arb_id(), any::<bool>()).prop_map(|(agent, client, user, public)| {
		Record::new()
			.with("agentId", agent.clone())
			.with("clientId", client)
			.with("userId", user)
			.with(
				"permissions",
				serde_json::json!({"isPublic": public, "canEdit": [agent]}),
			)
	})
}

fn arb_request() -> impl Strategy<Value = AccessRequest> {
	(
		proptest::sample::select(Collection::ALL.to_vec()),
		proptest::sample::select(Operation::all().to_vec()),
		proptest::option::of(arb_id()),
		proptest::option::of(arb_record()),
		proptest::option::of(arb_record()),
	)
		.prop_map(|(collection, operation, key, existing, proposed)| {
			let mut request = AccessRequest::new(collection, operation);
			if let Some(key) = key {
				request = request.with_resource_id(key);
			}
			request.existing = existing;
			request.proposed = proposed;
			request
		})
}

proptest! {
	#[test]
	fn resource_access_definition(
		principal in arb_principal(),
		agent_id in arb_id(),
		client_id in arb_id(),
	) {
		let expected = principal.id.as_str() == agent_id
			|| principal.id.as_str() == client_id
			|| (principal.role() == Role::Agent && principal.profile.client_ids.contains_key(&client_id));
		prop_assert_eq!(
			has_resource_access(
				Some(&principal),
				Some(agent_id.as_str()),
				Some(client_id.as_str()),
				&PolicyOptions::default(),
			),
			expected
		);
	}

	#[test]
	fn same_inputs_same_decision(principal in arb_principal(), request in arb_request()) {
		let options = PolicyOptions::default();
		prop_assert_eq!(
			evaluate(Some(&principal), &request, &options),
			evaluate(Some(&principal), &request, &options)
		);
	}

	#[test]
	fn no_public_paths(request in arb_request(), agent_self_client in any::<bool>()) {
		let options = PolicyOptions { agent_self_client };
		prop_assert_eq!(
			evaluate(None, &request, &options),
			Decision::Deny(DenyReason::Unauthenticated)
		);
	}

	#[test]
	fn legacy_access_is_exactly_ownership(
		principal in arb_principal(),
		existing in arb_record(),
		operation in proptest::sample::select(vec![Operation::Read, Operation::Update, Operation::Delete]),
	) {
		let owner = existing.str_field("userId").map(str::to_string);
		let request = AccessRequest::new(Collection::RepairEstimates, operation)
			.with_existing(existing.clone())
			.with_proposed(existing);
		let allowed = evaluate(Some(&principal), &request, &PolicyOptions::default()).is_allowed();
		prop_assert_eq!(allowed, owner.as_deref() == Some(principal.id.as_str()));
	}
}
