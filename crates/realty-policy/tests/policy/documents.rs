// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document ACL and document collection scenarios.

use realty_policy::{check_permission, AccessRequest, Collection, DocumentPermission, PolicyError, Record};
use serde_json::json;

use super::support::{document, run_policy_cases, Fixtures, PolicyCase};

#[test]
fn public_document_acl() {
	let doc = Record::new().with(
		"permissions",
		json!({"isPublic": true, "canView": [], "canEdit": ["u1"]}),
	);

	assert!(check_permission(&doc, "anyUser", DocumentPermission::CanView));
	assert!(!check_permission(&doc, "u2", DocumentPermission::CanEdit));
	assert!(check_permission(&doc, "u1", DocumentPermission::CanEdit));
}

#[test]
fn document_collection_rules() {
	let f = Fixtures::new();
	let shared = document("A1", "C1").with(
		"permissions",
		json!({"canView": ["S1"], "canEdit": ["C1"], "canShare": ["A1"], "canDelete": ["A1"]}),
	);

	run_policy_cases(&[
		PolicyCase {
			name: "listed viewer reads",
			principal: Some(&f.seller_s1),
			request: AccessRequest::read(Collection::Documents, shared.clone()),
			expected: Ok(()),
		},
		PolicyCase {
			name: "client's agent reads without listing",
			principal: Some(&f.agent_a1),
			request: AccessRequest::read(Collection::Documents, shared.clone()),
			expected: Ok(()),
		},
		PolicyCase {
			name: "stranger cannot read private document",
			principal: Some(&f.stranger),
			request: AccessRequest::read(Collection::Documents, shared.clone()),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "listed editor updates",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::update(
				Collection::Documents,
				shared.clone(),
				document("A1", "C1").with("status", "approved"),
			),
			expected: Ok(()),
		},
		PolicyCase {
			name: "agent without canEdit cannot update",
			principal: Some(&f.agent_a1),
			request: AccessRequest::update(Collection::Documents, shared.clone(), document("A1", "C1")),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "editor cannot set unknown status",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::update(
				Collection::Documents,
				shared.clone(),
				document("A1", "C1").with("status", "published"),
			),
			expected: Err(PolicyError::ValidationFailed),
		},
		PolicyCase {
			name: "listed deleter deletes",
			principal: Some(&f.agent_a1),
			request: AccessRequest::delete(Collection::Documents, shared.clone()),
			expected: Ok(()),
		},
		PolicyCase {
			name: "editor cannot delete",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::delete(Collection::Documents, shared),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "client creates document naming itself",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::create(Collection::Documents, document("A1", "C1")),
			expected: Ok(()),
		},
		PolicyCase {
			name: "title over 200 characters is rejected",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::create(
				Collection::Documents,
				document("A1", "C1").with("title", "x".repeat(201)),
			),
			expected: Err(PolicyError::ValidationFailed),
		},
		PolicyCase {
			name: "non-party cannot create document",
			principal: Some(&f.agent_a2),
			request: AccessRequest::create(Collection::Documents, document("A1", "C1")),
			expected: Err(PolicyError::Forbidden),
		},
	]);
}

#[test]
fn public_document_is_readable_by_every_principal() {
	let f = Fixtures::new();
	let public = document("A1", "C1").with("permissions", json!({"isPublic": true}));
	for principal in [&f.agent_a2, &f.seller_s1, &f.stranger] {
		run_policy_cases(&[PolicyCase {
			name: "public read",
			principal: Some(principal),
			request: AccessRequest::read(Collection::Documents, public.clone()),
			expected: Ok(()),
		}]);
	}
	run_policy_cases(&[PolicyCase {
		name: "public documents still need a principal",
		principal: None,
		request: AccessRequest::read(Collection::Documents, public),
		expected: Err(PolicyError::Unauthenticated),
	}]);
}

#[test]
fn templates_are_agent_managed() {
	let f = Fixtures::new();
	let template = Record::new().with("name", "Standard purchase agreement");
	run_policy_cases(&[
		PolicyCase {
			name: "client reads template",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::read(Collection::DocumentTemplates, template.clone()),
			expected: Ok(()),
		},
		PolicyCase {
			name: "client cannot edit template",
			principal: Some(&f.buyer_c1),
			request: AccessRequest::update(
				Collection::DocumentTemplates,
				template.clone(),
				template.clone(),
			),
			expected: Err(PolicyError::Forbidden),
		},
		PolicyCase {
			name: "any agent edits template",
			principal: Some(&f.agent_a2),
			request: AccessRequest::update(
				Collection::DocumentTemplates,
				template.clone(),
				template,
			),
			expected: Ok(()),
		},
	]);
}
