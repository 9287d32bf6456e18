// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use realty_policy::{
	evaluate, AccessRequest, PolicyError, PolicyOptions, Principal, Profile, Record, Role,
};

/// Principals shared by every scenario.
///
/// `agent_a1` represents client `C1`; `agent_a2` represents nobody. `buyer_c1`
/// is that client. `stranger` is a buyer with no relationships.
pub struct Fixtures {
	pub agent_a1: Principal,
	pub agent_a2: Principal,
	pub buyer_c1: Principal,
	pub seller_s1: Principal,
	pub stranger: Principal,
}

impl Fixtures {
	pub fn new() -> Self {
		Self {
			agent_a1: Principal::new("A1", Profile::agent(["C1"])),
			agent_a2: Principal::new("A2", Profile::new(Role::Agent)),
			buyer_c1: Principal::new("C1", Profile::new(Role::Buyer)),
			seller_s1: Principal::new("S1", Profile::new(Role::Seller)),
			stranger: Principal::new("X1", Profile::new(Role::Buyer)),
		}
	}
}

pub fn party(agent_id: &str, client_id: &str) -> Record {
	Record::new()
		.with("agentId", agent_id)
		.with("clientId", client_id)
}

pub fn offer(agent_id: &str, client_id: &str) -> Record {
	party(agent_id, client_id)
		.with("propertyId", "P-1001")
		.with("type", "buyer")
		.with("status", "draft")
		.with("purchasePrice", 100000)
		.with("earnestMoney", 1000)
		.with("downPayment", 5000)
		.with("loanAmount", 95000)
		.with("offerDate", "2024-05-01")
		.with("expirationDate", "2024-05-04")
		.with("closingDate", "2024-06-15")
}

pub fn negotiation(agent_id: &str, client_id: &str) -> Record {
	party(agent_id, client_id)
		.with("offerId", "O-1")
		.with("propertyId", "P-1001")
		.with("type", "seller_negotiation")
		.with("status", "active")
}

pub fn document(agent_id: &str, client_id: &str) -> Record {
	party(agent_id, client_id)
		.with("title", "Seller disclosure")
		.with("type", "disclosure")
		.with("category", "legal")
		.with("status", "review")
}

pub struct PolicyCase<'a> {
	pub name: &'static str,
	pub principal: Option<&'a Principal>,
	pub request: AccessRequest,
	pub expected: Result<(), PolicyError>,
}

pub fn run_policy_cases(cases: &[PolicyCase<'_>]) {
	let options = PolicyOptions::default();
	for case in cases {
		let decision = evaluate(case.principal, &case.request, &options);
		assert_eq!(
			decision.clone().into_result(),
			case.expected,
			"Case '{}': {} {} as {:?} - decision {:?}",
			case.name,
			case.request.operation,
			case.request.collection,
			case.principal.map(|p| p.id.as_str()),
			decision,
		);
	}
}
