// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Market data and agent-owned market records.

use realty_policy::{AccessRequest, Collection, PolicyError, Record};

use super::support::{run_policy_cases, Fixtures, PolicyCase};

#[test]
fn public_market_collections() {
	let f = Fixtures::new();
	let row = Record::new().with("zip", "78704").with("medianPrice", 615000);
	for collection in [
		Collection::MarketData,
		Collection::Comparables,
		Collection::MarketTrends,
		Collection::MarketForecasts,
	] {
		run_policy_cases(&[
			PolicyCase {
				name: "seller reads market data",
				principal: Some(&f.seller_s1),
				request: AccessRequest::read(collection, row.clone()),
				expected: Ok(()),
			},
			PolicyCase {
				name: "seller cannot publish market data",
				principal: Some(&f.seller_s1),
				request: AccessRequest::create(collection, row.clone()),
				expected: Err(PolicyError::Forbidden),
			},
			PolicyCase {
				name: "agent publishes market data",
				principal: Some(&f.agent_a2),
				request: AccessRequest::create(collection, row.clone()),
				expected: Ok(()),
			},
			PolicyCase {
				name: "anonymous cannot read market data",
				principal: None,
				request: AccessRequest::read(collection, row.clone()),
				expected: Err(PolicyError::Unauthenticated),
			},
		]);
	}
}

#[test]
fn alerts_and_reports_belong_to_one_agent() {
	let f = Fixtures::new();
	let owned = Record::new().with("agentId", "A1").with("query", "3br under 700k");
	for collection in [Collection::MarketAlerts, Collection::MarketReports] {
		run_policy_cases(&[
			PolicyCase {
				name: "owner reads",
				principal: Some(&f.agent_a1),
				request: AccessRequest::read(collection, owned.clone()),
				expected: Ok(()),
			},
			PolicyCase {
				name: "other agent cannot read",
				principal: Some(&f.agent_a2),
				request: AccessRequest::read(collection, owned.clone()),
				expected: Err(PolicyError::Forbidden),
			},
			PolicyCase {
				name: "owner cannot hand record to another agent",
				principal: Some(&f.agent_a1),
				request: AccessRequest::update(
					collection,
					owned.clone(),
					owned.clone().with("agentId", "A2"),
				),
				expected: Err(PolicyError::Forbidden),
			},
			PolicyCase {
				name: "owner deletes",
				principal: Some(&f.agent_a1),
				request: AccessRequest::delete(collection, owned.clone()),
				expected: Ok(()),
			},
			PolicyCase {
				name: "client cannot create",
				principal: Some(&f.buyer_c1),
				request: AccessRequest::create(collection, owned.clone().with("agentId", "C1")),
				expected: Err(PolicyError::Forbidden),
			},
		]);
	}
}
