// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Offers, negotiations, counter offers and their adjacent collections.

use realty_policy::abac::predicates::has_resource_access;
use realty_policy::{AccessRequest, Collection, PolicyError, PolicyOptions};

use super::support::{negotiation, offer, party, run_policy_cases, Fixtures, PolicyCase};

// ============================================================================
// Offers
// ============================================================================

#[test]
fn offer_lifecycle() {
	let f = Fixtures::new();
	let cases = [
		PolicyCase {
			name: "agent creates offer for own client",
			principal: Some(&f.agent_a1),
			request: AccessRequest::create(Collection::Offers, offer("A1", "C1")),
			expected: Ok(()),
		},
		PolicyCase {
			name: "agent cannot create offer under another agent",
			principal: Some(&f.agent_a1),
			request: AccessRequest::create(Collection::Offers, offer("A2", "C1")),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "client cannot create offer",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::create(Collection::Offers, offer("A1", "C1")),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "offer missing closing date is rejected",
			principal: Some(&f.agent_a1),
			request: AccessRequest::create(
				Collection::Offers,
				offer("A1", "C1").without("closingDate"),
			),
			expected: Err(PolicyError::ValidationFailed),
		},
		PolicyCase {
			name: "negative earnest money is rejected",
			principal: Some(&f.agent_a1),
			request: AccessRequest::create(
				Collection::Offers,
				offer("A1", "C1").with("earnestMoney", -1),
			),
			expected: Err(PolicyError::ValidationFailed),
		},
		PolicyCase {
			name: "client reads own offer",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::read(Collection::Offers, offer("A1", "C1")),
			expected: Ok(()),
		},
		PolicyCase {
			name: "client accepts offer",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::update(
				Collection::Offers,
				offer("A1", "C1"),
				offer("A1", "C1").with("status", "accepted"),
			),
			expected: Ok(()),
		},
		PolicyCase {
			name: "stranger cannot read offer",
			principal: Some(&f.stranger),
			request: AccessRequest::read(Collection::Offers, offer("A1", "C1")),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "client cannot delete offer",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::delete(Collection::Offers, offer("A1", "C1")),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "owning agent deletes offer",
			principal: Some(&f.agent_a1),
			request: AccessRequest::delete(Collection::Offers, offer("A1", "C1")),
			expected: Ok(()),
		},
		PolicyCase {
			name: "read without stored offer",
			principal: Some(&f.agent_a1),
			request: AccessRequest::new(Collection::Offers, realty_policy::Operation::Read),
			expected: Err(PolicyError::NotFound),
		},
	];
	run_policy_cases(&cases);
}

/// Agent A1 represents C1, so it reaches an offer A2 wrote for C1.
#[test]
fn agent_reaches_offer_through_client_list() {
	let f = Fixtures::new();
	let record = offer("A2", "C1");
	assert!(has_resource_access(
		Some(&f.agent_a1),
		record.agent_id(),
		record.client_id(),
		&PolicyOptions::default(),
	));
	run_policy_cases(&[
		PolicyCase {
			name: "associated agent reads",
			principal: Some(&f.agent_a1),
			request: AccessRequest::read(Collection::Offers, record.clone()),
			expected: Ok(()),
		},
		PolicyCase {
			name: "associated agent updates",
			principal: Some(&f.agent_a1),
			request: AccessRequest::update(
				Collection::Offers,
				record.clone(),
				record.clone().with("status", "submitted"),
			),
			expected: Ok(()),
		},
		PolicyCase {
			name: "associated agent cannot delete",
			principal: Some(&f.agent_a1),
			request: AccessRequest::delete(Collection::Offers, record.clone()),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "unrelated seller cannot read",
			principal: Some(&f.seller_s1),
			request: AccessRequest::read(Collection::Offers, record),
			expected: Err(PolicyError::Forbidden),
		},
	]);
}

// ============================================================================
// Negotiations and adjacent collections
// ============================================================================

#[test]
fn negotiation_rules() {
	let f = Fixtures::new();
	run_policy_cases(&[
		PolicyCase {
			name: "agent opens negotiation",
			principal: Some(&f.agent_a1),
			request: AccessRequest::create(Collection::Negotiations, negotiation("A1", "C1")),
			expected: Ok(()),
		},
		PolicyCase {
			name: "negotiation with offer type is rejected",
			principal: Some(&f.agent_a1),
			request: AccessRequest::create(
				Collection::Negotiations,
				negotiation("A1", "C1").with("type", "buyer"),
			),
			expected: Err(PolicyError::ValidationFailed),
		},
		PolicyCase {
			name: "client stalls negotiation",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::update(
				Collection::Negotiations,
				negotiation("A1", "C1"),
				negotiation("A1", "C1").with("status", "stalled"),
			),
			expected: Ok(()),
		},
	]);
}

#[test]
fn adjacent_collections_require_party_fields() {
	let f = Fixtures::new();
	for collection in [
		Collection::OfferComparisons,
		Collection::OfferDocuments,
		Collection::OfferWorkflows,
		Collection::NegotiationStrategies,
		Collection::AppraisalScenarios,
		Collection::NegotiationDocuments,
		Collection::MarketAnalyses,
		Collection::RiskAssessments,
		Collection::DocumentLibraries,
		Collection::DocumentShares,
		Collection::DocumentAnalytics,
	] {
		run_policy_cases(&[
			PolicyCase {
				name: "agent creates party record",
				principal: Some(&f.agent_a1),
				request: AccessRequest::create(collection, party("A1", "C1").with("notes", "x")),
				expected: Ok(()),
			},
			PolicyCase {
				name: "record without client is rejected",
				principal: Some(&f.agent_a1),
				request: AccessRequest::create(collection, party("A1", "C1").without("clientId")),
				expected: Err(PolicyError::ValidationFailed),
			},
			PolicyCase {
				name: "client reads party record",
				principal: Some(&f.buyer_c1),
				request: AccessRequest::read(collection, party("A1", "C1")),
				expected: Ok(()),
			},
		]);
	}
}

// ============================================================================
// Counter offers
// ============================================================================

#[test]
fn either_side_raises_counter_offers() {
	let f = Fixtures::new();
	run_policy_cases(&[
		PolicyCase {
			name: "client counters",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::create(Collection::CounterOffers, party("A1", "C1")),
			expected: Ok(()),
		},
		PolicyCase {
			name: "agent counters",
			principal: Some(&f.agent_a1),
			request: AccessRequest::create(Collection::CounterOffers, party("A1", "C1")),
			expected: Ok(()),
		},
		PolicyCase {
			name: "stranger cannot counter",
			principal: Some(&f.stranger),
			request: AccessRequest::create(Collection::CounterOffers, party("A1", "C1")),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "client revises counter",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::update(
				Collection::CounterOffers,
				party("A1", "C1"),
				party("A1", "C1").with("amount", 98000),
			),
			expected: Ok(()),
		},
		PolicyCase {
			name: "client cannot delete counter",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::delete(Collection::CounterOffers, party("A1", "C1")),
			expected: Err(PolicyError::Forbidden),
		},
	]);
}
